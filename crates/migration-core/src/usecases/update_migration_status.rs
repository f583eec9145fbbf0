//! T3: `update_migration_status`
//!
//! No tool explicitly creates the Media Transfer (E4) row or appends the
//! baseline Storage Snapshot (E5); scenario S1 shows both appearing right
//! after the `update_migration_status` call that first carries a
//! destination baseline. This implementation treats "update sets
//! `google_photos_baseline_gb` for the first time" as that side effect's
//! trigger: it creates E4 (using the counters already recorded on E1) and
//! appends the `is_baseline = true` E5 row.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    DailyProgress, MediaTransfer, Migration, MigrationId, MigrationUpdate, SnapshotId,
    StorageSnapshot, ToolError, TransferId,
};
use crate::ports::{day_to_date, IStateRepository};
use crate::progress::milestone_for_day;

/// Applies a progressive-enrichment update to a migration.
///
/// # Errors
/// - `not_found` if `migration_id` is unknown.
/// - `invalid_argument` if `overall_progress` is outside `0..=100`.
/// - `invariant_violation` if a monotone counter would decrease (detected by
///   the repository at the point of comparison).
pub async fn update_migration_status(
    repo: &dyn IStateRepository,
    migration_id: MigrationId,
    update: MigrationUpdate,
    now: DateTime<Utc>,
) -> Result<Migration, ToolError> {
    if let Some(progress) = update.overall_progress {
        if !(0..=100).contains(&progress) {
            return Err(ToolError::InvalidArgument(
                "overall_progress must be in 0..=100".to_string(),
            ));
        }
    }

    let captures_baseline = update.google_photos_baseline_gb.is_some();
    let migration = repo.update_migration(migration_id, &update).await?;

    if captures_baseline && repo.get_media_transfer(migration_id).await?.is_none() {
        create_transfer_and_baseline(repo, &migration, now).await?;
    }

    Ok(migration)
}

async fn create_transfer_and_baseline(
    repo: &dyn IStateRepository,
    migration: &Migration,
    now: DateTime<Utc>,
) -> Result<(), ToolError> {
    let transfer_id = TransferId::new(Uuid::new_v4().to_string())?;
    let transfer = MediaTransfer::new(
        transfer_id,
        migration.id(),
        migration.photo_count().unwrap_or(0),
        migration.video_count().unwrap_or(0),
        migration.total_icloud_storage_gb().unwrap_or(0.0),
        migration.google_photos_baseline_gb().unwrap_or(0.0),
        migration.google_drive_baseline_gb().unwrap_or(0.0),
        migration.google_mail_baseline_gb().unwrap_or(0.0),
        now,
    );
    repo.create_media_transfer(&transfer).await?;

    let baseline_gb = migration.google_photos_baseline_gb().unwrap_or(0.0);
    let snapshot = StorageSnapshot::new(
        SnapshotId::new(0),
        migration.id(),
        1,
        now,
        baseline_gb,
        migration.google_drive_baseline_gb().unwrap_or(0.0),
        migration.google_mail_baseline_gb().unwrap_or(0.0),
        0.0,
        0.0,
        0,
        0,
        0.0,
        true,
    );
    let daily = DailyProgress {
        migration_id: migration.id(),
        day_number: 1,
        date: day_to_date(migration.started_at(), 1),
        photos_transferred_estimate: 0,
        videos_transferred_estimate: 0,
        size_transferred_gb: 0.0,
        storage_percent_complete: 0.0,
        service_adoption_counts: std::collections::HashMap::new(),
        key_milestone: milestone_for_day(1).unwrap_or_default().to_string(),
        notes: None,
        updated_at: now,
    };
    repo.record_progress(snapshot, daily).await?;
    Ok(())
}
