//! Domain entities and business logic
//!
//! Pure types with no external dependencies: newtypes for identifiers and
//! closed enumerations, the data-model entities (E1-E6), and the error
//! taxonomy that crosses every port and tool boundary.

pub mod daily;
pub mod errors;
pub mod family;
pub mod migration;
pub mod newtypes;
pub mod snapshot;
pub mod transfer;

pub use daily::DailyProgress;
pub use errors::{DomainError, StoreError, ToolError};
pub use family::{AdoptionDetails, FamilyAppAdoption, FamilyMember};
pub use migration::{Migration, MigrationUpdate};
pub use newtypes::*;
pub use snapshot::{NewStorageSnapshot, StorageSnapshot};
pub use transfer::MediaTransfer;
