//! Use cases (interactors) for the migration assistant
//!
//! One function per tool-surface operation (T1-T7), orchestrating domain
//! entities through port interfaces. Use cases are thin
//! coordinators: validation and business rules live here or in the domain
//! types they call; I/O lives entirely behind `IStateRepository` /
//! `IBrowserCollaborator` / `IDeviceCollaborator`.
//!
//! ## Use Cases
//!
//! - [`initialize_migration::initialize_migration`] - T1
//! - [`add_family_member::add_family_member`] - T2
//! - [`update_migration_status::update_migration_status`] - T3
//! - [`update_family_member_apps::update_family_member_apps`] - T4
//! - [`get_migration_status::get_migration_status`] - T5
//! - [`get_family_members::get_family_members`] - T6
//! - [`generate_migration_report::generate_migration_report`] - T7

pub mod add_family_member;
pub mod generate_migration_report;
pub mod get_family_members;
pub mod get_migration_status;
pub mod initialize_migration;
pub mod update_family_member_apps;
pub mod update_migration_status;

pub use add_family_member::add_family_member;
pub use generate_migration_report::{generate_migration_report, MigrationReport};
pub use get_family_members::get_family_members;
pub use get_migration_status::{get_migration_status, MigrationStatus};
pub use initialize_migration::initialize_migration;
pub use update_family_member_apps::update_family_member_apps;
pub use update_migration_status::update_migration_status;
