//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IStateRepository`] — C1, the state store
//! - [`IBrowserCollaborator`] — C4, browser automation
//! - [`IDeviceCollaborator`] — C5, device control

pub mod browser_collaborator;
pub mod device_collaborator;
pub mod state_repository;

#[cfg(test)]
pub mod tests_support;

pub use browser_collaborator::{
    DestinationBaseline, IBrowserCollaborator, SourceInventory, TransferInitiation,
};
pub use device_collaborator::{DeviceObservation, IDeviceCollaborator};
pub use state_repository::{
    day_to_date, DailySummary, FamilyMemberView, FamilyServiceCounts, FamilyServiceSummary,
    IStateRepository, MigrationOverview,
};
