//! T6: `get_family_members`

use crate::domain::{FamilyMemberFilter, MigrationId, ToolError};
use crate::ports::{FamilyMemberView, IStateRepository};

/// Lists family members for a migration, optionally filtered.
///
/// # Errors
/// `not_found` if `migration_id` is unknown.
pub async fn get_family_members(
    repo: &dyn IStateRepository,
    migration_id: MigrationId,
    filter: FamilyMemberFilter,
) -> Result<Vec<FamilyMemberView>, ToolError> {
    repo.get_migration(migration_id).await?;
    repo.get_family_members(migration_id, filter)
        .await
        .map_err(Into::into)
}
