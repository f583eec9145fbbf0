//! T2: `add_family_member`

use crate::domain::{FamilyMember, MigrationId, Role, ToolError};
use crate::ports::IStateRepository;

/// Registers a household member against an existing migration.
///
/// # Errors
/// - `not_found` if `migration_id` does not reference an existing migration.
/// - `invalid_argument` if `name` is empty.
pub async fn add_family_member(
    repo: &dyn IStateRepository,
    migration_id: MigrationId,
    name: &str,
    role: Role,
    age: Option<i32>,
) -> Result<FamilyMember, ToolError> {
    if name.trim().is_empty() {
        return Err(ToolError::InvalidArgument(
            "name must not be empty".to_string(),
        ));
    }
    repo.get_migration(migration_id).await?;
    repo.add_family_member(migration_id, name, role, age)
        .await
        .map_err(Into::into)
}
