//! Device Collaborator port (C5)
//!
//! Mirrors [`super::browser_collaborator::IBrowserCollaborator`]'s shape.
//! The core never interprets the natural-language commands it sends; it
//! only records the structured observation the collaborator returns, via
//! T4 (`update_family_member_apps`).

use serde::{Deserialize, Serialize};

/// The outcome of a natural-language device operation: which
/// named entities (apps, contacts, group members — domain-specific per
/// command) were found on-device versus not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceObservation {
    pub found: Vec<String>,
    pub not_found: Vec<String>,
}

/// The device-control collaborator. Production automation (UI element
/// detection, gesture synthesis) is explicitly out of scope; this trait is
/// the stable boundary the core depends on.
#[async_trait::async_trait]
pub trait IDeviceCollaborator: Send + Sync {
    /// Executes a sequence of imperative English sentences against the
    /// handset and reports back what was observed. The core treats
    /// `commands` as opaque text — it never parses or validates them.
    async fn run_commands(&self, commands: &[String]) -> anyhow::Result<DeviceObservation>;
}
