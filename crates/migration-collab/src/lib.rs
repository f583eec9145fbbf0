//! Migration Assistant Collab - deterministic Browser/Device collaborators (C4/C5)
//!
//! The one adapter this repository ships for
//! `migration_core::ports::{IBrowserCollaborator, IDeviceCollaborator}`:
//! fixture-driven and fully in-memory, used by `migration-agent`'s demo
//! mode and by `migration-tools`' integration tests. Production browser and
//! device automation are explicitly out of scope.
//!
//! ## Modules
//!
//! - [`fixture`] - the scripted readings and entity list backing both adapters
//! - [`browser`] - [`browser::FixtureBrowserCollaborator`]
//! - [`device`] - [`device::FixtureDeviceCollaborator`]

pub mod browser;
pub mod device;
pub mod fixture;

pub use browser::FixtureBrowserCollaborator;
pub use device::FixtureDeviceCollaborator;
pub use fixture::CollabFixture;
