//! T4: `update_family_member_apps`

use chrono::{DateTime, Utc};

use crate::domain::{
    AdoptionDetails, AdoptionStatus, FamilyAppAdoption, MigrationId, Service, ToolError,
};
use crate::ports::IStateRepository;

/// Records adoption progress for one (family member, service) pair.
///
/// # Errors
/// - `not_found` if `member_name` does not resolve within the migration.
/// - `invariant_violation` is never raised here: a backward transition is a
///   silent no-op, not an error.
pub async fn update_family_member_apps(
    repo: &dyn IStateRepository,
    migration_id: MigrationId,
    member_name: &str,
    service: Service,
    status: AdoptionStatus,
    details: Option<AdoptionDetails>,
    now: DateTime<Utc>,
) -> Result<FamilyAppAdoption, ToolError> {
    let member = repo
        .get_family_member_by_name(migration_id, member_name)
        .await?;
    repo.upsert_family_app_adoption(migration_id, member.id(), service, status, details, now)
        .await
        .map_err(Into::into)
}
