//! T5: `get_migration_status` — the "uber status" operation and the only
//! one in the tool surface that calls a collaborator.
//!
//! Absent a transfer, callers still expect `photo_progress.percent_complete
//! = 0` for days 1-3. Rather than special-casing "no progress section" as a
//! distinct response shape, this implementation always runs the Progress
//! Engine — with `baseline_gb = 0` and `current_storage_gb = 0` when no
//! transfer exists — so days 1-3 naturally read `percent_complete = 0` and
//! the unconditional Day-7 override still applies.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::{DailyProgress, MigrationId, SnapshotId, StorageSnapshot, ToolError};
use crate::ports::{
    day_to_date, DailySummary, FamilyServiceSummary, IBrowserCollaborator, IStateRepository,
    MigrationOverview,
};
use crate::progress::{calculate_progress, ProgressInput};

const COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MigrationStatus {
    pub day_summary: DailySummary,
    pub migration_overview: MigrationOverview,
    pub photo_progress: StorageSnapshot,
    pub family_services: FamilyServiceSummary,
    pub status_message: String,
}

/// Composes the uber-status record, writing a Storage Snapshot and upserting
/// Daily Progress as a side effect.
///
/// # Errors
/// - `invalid_argument` if `day_number` is outside `1..=7`.
/// - `not_found` if `migration_id` is unknown.
pub async fn get_migration_status(
    repo: &dyn IStateRepository,
    collaborator: &dyn IBrowserCollaborator,
    migration_id: MigrationId,
    day_number: i32,
    now: DateTime<Utc>,
) -> Result<MigrationStatus, ToolError> {
    if !(1..=7).contains(&day_number) {
        return Err(ToolError::InvalidArgument(format!(
            "day_number must be in 1..=7, got {day_number}"
        )));
    }

    let migration = repo.get_migration(migration_id).await?;
    let transfer = repo.get_media_transfer(migration_id).await?;

    let (baseline_gb, total_source_gb) = match &transfer {
        Some(t) => (
            t.google_photos_baseline_gb(),
            migration.total_icloud_storage_gb().unwrap_or(0.0),
        ),
        None => (0.0, 0.0),
    };

    let current_storage_gb = match &transfer {
        Some(_) if day_number >= 2 => {
            match tokio::time::timeout(
                COLLABORATOR_TIMEOUT,
                collaborator.get_destination_photos_storage_gb(),
            )
            .await
            {
                Ok(Ok(value)) => value,
                // Soft fault: fall back to stored state.
                _ => repo
                    .get_latest_snapshot(migration_id)
                    .await?
                    .map(|s| s.google_photos_gb())
                    .unwrap_or(baseline_gb),
            }
        }
        Some(t) => t.google_photos_baseline_gb(),
        None => baseline_gb,
    };

    let output = calculate_progress(ProgressInput {
        baseline_gb,
        total_source_storage_gb: total_source_gb,
        current_storage_gb,
        day_number,
    })?;

    let snapshot = StorageSnapshot::new(
        SnapshotId::new(0),
        migration_id,
        day_number,
        now,
        current_storage_gb,
        0.0,
        0.0,
        0.0,
        output.storage.growth_gb,
        output.estimates.photos,
        output.estimates.videos,
        output.progress.percent_complete,
        false,
    );

    let family_services = repo.get_family_service_summary(migration_id).await?;
    let mut service_adoption_counts = std::collections::HashMap::new();
    service_adoption_counts.insert(crate::domain::Service::Messaging, family_services.messaging.configured);
    service_adoption_counts.insert(crate::domain::Service::Location, family_services.location.configured);
    service_adoption_counts.insert(crate::domain::Service::Payments, family_services.payments.configured);

    let daily = DailyProgress {
        migration_id,
        day_number,
        date: day_to_date(migration.started_at(), day_number),
        photos_transferred_estimate: output.estimates.photos,
        videos_transferred_estimate: output.estimates.videos,
        size_transferred_gb: output.storage.growth_gb,
        storage_percent_complete: output.progress.percent_complete,
        service_adoption_counts,
        key_milestone: output.message.clone(),
        notes: None,
        updated_at: now,
    };

    let persisted_snapshot = repo.record_progress(snapshot, daily).await?;

    if let Some(mut transfer) = transfer {
        transfer.mark_first_visibility(day_number, output.storage.growth_gb, now);
        if day_number == 7 {
            transfer.mark_completed(now);
        }
        repo.update_media_transfer(&transfer).await?;
    }

    let day_summary = repo.get_daily_summary(migration_id, day_number).await?;
    let migration_overview = repo.get_overview(migration_id).await?;
    let status_message = format!(
        "Day {day_number}: {percent}% complete",
        percent = output.progress.percent_complete
    );

    Ok(MigrationStatus {
        day_summary,
        migration_overview,
        photo_progress: persisted_snapshot,
        family_services,
        status_message,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{MigrationUpdate, TransferId};
    use crate::ports::browser_collaborator::{DestinationBaseline, SourceInventory, TransferInitiation};
    use crate::ports::tests_support::InMemoryStateRepository;
    use crate::usecases::update_migration_status::update_migration_status;

    struct FixedCollaborator(f64);

    #[async_trait::async_trait]
    impl IBrowserCollaborator for FixedCollaborator {
        async fn get_source_inventory(&self) -> anyhow::Result<SourceInventory> {
            unimplemented!("unused by T5")
        }

        async fn initiate_transfer(&self) -> anyhow::Result<TransferInitiation> {
            unimplemented!("unused by T5")
        }

        async fn get_destination_photos_storage_gb(&self) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingCollaborator;

    #[async_trait::async_trait]
    impl IBrowserCollaborator for FailingCollaborator {
        async fn get_source_inventory(&self) -> anyhow::Result<SourceInventory> {
            unimplemented!("unused by T5")
        }

        async fn initiate_transfer(&self) -> anyhow::Result<TransferInitiation> {
            unimplemented!("unused by T5")
        }

        async fn get_destination_photos_storage_gb(&self) -> anyhow::Result<f64> {
            Err(anyhow::anyhow!("collaborator down"))
        }
    }

    async fn bootstrapped_migration(repo: &InMemoryStateRepository) -> MigrationId {
        let migration_id = repo
            .create_migration("Carol", 10, Utc::now())
            .await
            .unwrap()
            .id();
        update_migration_status(
            repo,
            migration_id,
            MigrationUpdate {
                photo_count: Some(1000),
                video_count: Some(50),
                total_icloud_storage_gb: Some(10.0),
                ..Default::default()
            },
            Utc::now(),
        )
        .await
        .unwrap();
        update_migration_status(
            repo,
            migration_id,
            MigrationUpdate {
                google_photos_baseline_gb: Some(1.5),
                ..Default::default()
            },
            Utc::now(),
        )
        .await
        .unwrap();
        migration_id
    }

    #[tokio::test]
    async fn day_out_of_range_is_invalid_argument() {
        let repo = InMemoryStateRepository::new();
        let migration_id = bootstrapped_migration(&repo).await;
        let collaborator = FixedCollaborator(1.5);
        let err = get_migration_status(&repo, &collaborator, migration_id, 0, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[tokio::test]
    async fn no_prior_transfer_reports_zero_percent_for_days_one_to_three() {
        let repo = InMemoryStateRepository::new();
        let migration_id = repo
            .create_migration("Carol", 10, Utc::now())
            .await
            .unwrap()
            .id();
        let collaborator = FixedCollaborator(0.0);
        for day in 1..=3 {
            let status = get_migration_status(&repo, &collaborator, migration_id, day, Utc::now())
                .await
                .unwrap();
            assert_eq!(status.photo_progress.percent_complete(), 0.0);
        }
    }

    #[tokio::test]
    async fn scenario_s3_day_four_first_visibility() {
        let repo = InMemoryStateRepository::new();
        let migration_id = bootstrapped_migration(&repo).await;
        let collaborator = FixedCollaborator(4.3);
        let status = get_migration_status(&repo, &collaborator, migration_id, 4, Utc::now())
            .await
            .unwrap();
        assert!((status.photo_progress.percent_complete() - 28.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn scenario_s4_day_seven_override_completes_transfer() {
        let repo = InMemoryStateRepository::new();
        let migration_id = bootstrapped_migration(&repo).await;
        let collaborator = FixedCollaborator(6.0);
        let status = get_migration_status(&repo, &collaborator, migration_id, 7, Utc::now())
            .await
            .unwrap();
        assert_eq!(status.photo_progress.percent_complete(), 100.0);

        let transfer_id = repo
            .get_media_transfer(migration_id)
            .await
            .unwrap()
            .unwrap()
            .id()
            .clone();
        let transfer = repo.get_media_transfer_by_id(&transfer_id).await.unwrap();
        assert_eq!(
            transfer.overall_status(),
            crate::domain::MediaKindStatus::Completed
        );
    }

    #[tokio::test]
    async fn collaborator_failure_is_a_soft_fault_falling_back_to_stored_state() {
        let repo = InMemoryStateRepository::new();
        let migration_id = bootstrapped_migration(&repo).await;
        let good = FixedCollaborator(4.3);
        get_migration_status(&repo, &good, migration_id, 4, Utc::now())
            .await
            .unwrap();

        let failing = FailingCollaborator;
        let status = get_migration_status(&repo, &failing, migration_id, 5, Utc::now())
            .await
            .unwrap();
        // Falls back to the last stored snapshot (4.3 GB) rather than erroring.
        assert!(status.photo_progress.percent_complete() > 0.0);
    }

    #[tokio::test]
    async fn idempotency_twice_same_day_yields_two_snapshots_one_daily_row() {
        let repo = InMemoryStateRepository::new();
        let migration_id = bootstrapped_migration(&repo).await;
        let collaborator = FixedCollaborator(4.3);
        get_migration_status(&repo, &collaborator, migration_id, 4, Utc::now())
            .await
            .unwrap();
        get_migration_status(&repo, &collaborator, migration_id, 4, Utc::now())
            .await
            .unwrap();

        let snapshots = repo.list_storage_snapshots(migration_id).await.unwrap();
        // baseline (day 1) + two day-4 appends
        assert_eq!(snapshots.len(), 3);
        let daily = repo.list_daily_progress(migration_id).await.unwrap();
        assert_eq!(daily.iter().filter(|d| d.day_number == 4).count(), 1);
    }
}
