//! Browser Collaborator port (C4)
//!
//! An `async_trait` with plain DTO structs distinct from domain entities,
//! and `anyhow::Result` returns since collaborator failures are
//! adapter-specific and are classified into the `ToolError` taxonomy by the
//! calling use case, not by the port itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TransferId;

/// Result of `get_source_inventory`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceInventory {
    pub photos: i64,
    pub videos: i64,
    pub storage_gb: f64,
    pub album_count: i64,
}

/// Destination-side baseline captured at `initiate_transfer` time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DestinationBaseline {
    pub photos_gb: f64,
    pub drive_gb: f64,
    pub mail_gb: f64,
    pub total_gb: f64,
    pub captured_at: DateTime<Utc>,
}

/// Result of `initiate_transfer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferInitiation {
    pub transfer_id: TransferId,
    pub baseline: DestinationBaseline,
}

/// The browser-automation collaborator. Production automation (page
/// navigation, 2FA, DOM selectors) is explicitly out of scope; this trait
/// is the stable boundary the core depends on.
#[async_trait::async_trait]
pub trait IBrowserCollaborator: Send + Sync {
    /// Reads the source provider's privacy/export portal. Session reuse is
    /// the collaborator's concern; the core calls this at most once per run.
    async fn get_source_inventory(&self) -> anyhow::Result<SourceInventory>;

    /// Causes the external provider to begin copying and returns the
    /// destination baseline reading taken at that moment.
    async fn initiate_transfer(&self) -> anyhow::Result<TransferInitiation>;

    /// One number, one call: the destination's current photo-library storage
    /// in GB. The only collaborator call inside T5.
    async fn get_destination_photos_storage_gb(&self) -> anyhow::Result<f64>;
}
