//! SQLite implementation of `IStateRepository`
//!
//! Concrete, persistent implementation of the state repository port defined
//! in `migration-core`. Handles domain type serialization/deserialization
//! and SQL query construction for E1-E6.
//!
//! ## Type Mapping
//!
//! | Domain Type                            | SQL Type | Strategy                              |
//! |------------------------------------------|----------|----------------------------------------|
//! | `MigrationId`, `FamilyMemberId`, etc.    | INTEGER  | `.as_i64()` / `FromStr`                |
//! | `TransferId`                             | TEXT     | `.as_str()` / `FromStr`                |
//! | `Role`, `Service`, `AdoptionStatus`, ...  | TEXT     | `Display` / `FromStr`                  |
//! | `DateTime<Utc>`                          | TEXT     | ISO 8601 via `to_rfc3339()` / parse    |
//! | `HashMap<Service, u32>`                  | TEXT     | serde_json serialization               |

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use migration_core::domain::{
    AdoptionDetails, AdoptionId, AdoptionStatus, DailyProgress, FamilyAppAdoption, FamilyMember,
    FamilyMemberFilter, FamilyMemberId, MediaKindStatus, MediaTransfer, Migration, MigrationId,
    MigrationUpdate, Phase, Role, Service, SnapshotId, StoreError, StorageSnapshot, TransferId,
};
use migration_core::ports::{
    DailySummary, FamilyMemberView, FamilyServiceCounts, FamilyServiceSummary, IStateRepository,
    MigrationOverview,
};

/// SQLite-based implementation of the state repository port (C1).
///
/// All operations go through a shared connection pool so concurrent tool
/// calls serialize at the database rather than in application code.
pub struct SqliteStateRepository {
    pool: SqlitePool,
}

impl SqliteStateRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Helper functions for type conversion
// ============================================================================

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Backend(format!("invalid timestamp '{s}': {e}")))
}

fn parse_optional_datetime(s: Option<String>) -> Result<Option<DateTime<Utc>>, StoreError> {
    match s {
        Some(ref val) if !val.is_empty() => parse_datetime(val).map(Some),
        _ => Ok(None),
    }
}

fn parse_enum<T>(s: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| StoreError::Backend(format!("invalid enum value '{s}': {e}")))
}

fn parse_date(s: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StoreError::Backend(format!("invalid date '{s}': {e}")))
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

// ============================================================================
// Row mapping
// ============================================================================

fn map_migration(row: &SqliteRow) -> Result<Migration, StoreError> {
    let id: i64 = row.try_get("id").map_err(backend)?;
    let user_name: String = row.try_get("user_name").map_err(backend)?;
    let years_on_source: i64 = row.try_get("years_on_source").map_err(backend)?;
    let photo_count: Option<i64> = row.try_get("photo_count").map_err(backend)?;
    let video_count: Option<i64> = row.try_get("video_count").map_err(backend)?;
    let total_icloud_storage_gb: Option<f64> = row.try_get("total_icloud_storage_gb").map_err(backend)?;
    let google_photos_baseline_gb: Option<f64> =
        row.try_get("google_photos_baseline_gb").map_err(backend)?;
    let google_drive_baseline_gb: Option<f64> =
        row.try_get("google_drive_baseline_gb").map_err(backend)?;
    let google_mail_baseline_gb: Option<f64> = row.try_get("google_mail_baseline_gb").map_err(backend)?;
    let family_size: Option<i64> = row.try_get("family_size").map_err(backend)?;
    let family_group_name: Option<String> = row.try_get("family_group_name").map_err(backend)?;
    let phase_str: String = row.try_get("phase").map_err(backend)?;
    let overall_progress: i64 = row.try_get("overall_progress").map_err(backend)?;
    let started_at_str: String = row.try_get("started_at").map_err(backend)?;
    let completed_at_str: Option<String> = row.try_get("completed_at").map_err(backend)?;

    Ok(Migration::from_parts(
        MigrationId::new(id),
        user_name,
        years_on_source as i32,
        photo_count,
        video_count,
        total_icloud_storage_gb,
        google_photos_baseline_gb,
        google_drive_baseline_gb,
        google_mail_baseline_gb,
        family_size.map(|v| v as i32),
        family_group_name,
        parse_enum::<Phase>(&phase_str)?,
        overall_progress as i32,
        parse_datetime(&started_at_str)?,
        parse_optional_datetime(completed_at_str)?,
    ))
}

fn map_family_member(row: &SqliteRow) -> Result<FamilyMember, StoreError> {
    let id: i64 = row.try_get("id").map_err(backend)?;
    let migration_id: i64 = row.try_get("migration_id").map_err(backend)?;
    let display_name: String = row.try_get("display_name").map_err(backend)?;
    let role_str: String = row.try_get("role").map_err(backend)?;
    let age: Option<i64> = row.try_get("age").map_err(backend)?;

    Ok(FamilyMember::new(
        FamilyMemberId::new(id),
        MigrationId::new(migration_id),
        display_name,
        parse_enum::<Role>(&role_str)?,
        age.map(|v| v as i32),
    ))
}

fn map_adoption(row: &SqliteRow) -> Result<FamilyAppAdoption, StoreError> {
    let id: i64 = row.try_get("id").map_err(backend)?;
    let family_member_id: i64 = row.try_get("family_member_id").map_err(backend)?;
    let service_str: String = row.try_get("service").map_err(backend)?;
    let status_str: String = row.try_get("status").map_err(backend)?;
    let invited_at: Option<String> = row.try_get("invited_at").map_err(backend)?;
    let installed_at: Option<String> = row.try_get("installed_at").map_err(backend)?;
    let configured_at: Option<String> = row.try_get("configured_at").map_err(backend)?;
    let in_group: Option<bool> = row.try_get("in_group").map_err(backend)?;
    let location_share_sent: Option<bool> = row.try_get("location_share_sent").map_err(backend)?;
    let location_share_received: Option<bool> =
        row.try_get("location_share_received").map_err(backend)?;
    let card_activated: Option<bool> = row.try_get("card_activated").map_err(backend)?;
    let card_last_four: Option<String> = row.try_get("card_last_four").map_err(backend)?;

    Ok(FamilyAppAdoption::from_parts(
        AdoptionId::new(id),
        FamilyMemberId::new(family_member_id),
        parse_enum::<Service>(&service_str)?,
        parse_enum::<AdoptionStatus>(&status_str)?,
        parse_optional_datetime(invited_at)?,
        parse_optional_datetime(installed_at)?,
        parse_optional_datetime(configured_at)?,
        in_group,
        location_share_sent,
        location_share_received,
        card_activated,
        card_last_four,
    ))
}

fn map_transfer(row: &SqliteRow) -> Result<MediaTransfer, StoreError> {
    let id: String = row.try_get("id").map_err(backend)?;
    let migration_id: i64 = row.try_get("migration_id").map_err(backend)?;
    let source_photo_count: i64 = row.try_get("source_photo_count").map_err(backend)?;
    let source_video_count: i64 = row.try_get("source_video_count").map_err(backend)?;
    let source_storage_gb: f64 = row.try_get("source_storage_gb").map_err(backend)?;
    let google_photos_baseline_gb: f64 = row.try_get("google_photos_baseline_gb").map_err(backend)?;
    let google_drive_baseline_gb: f64 = row.try_get("google_drive_baseline_gb").map_err(backend)?;
    let google_mail_baseline_gb: f64 = row.try_get("google_mail_baseline_gb").map_err(backend)?;
    let photo_status_str: String = row.try_get("photo_status").map_err(backend)?;
    let video_status_str: String = row.try_get("video_status").map_err(backend)?;
    let initiated_at_str: String = row.try_get("initiated_at").map_err(backend)?;
    let photo_started_at: Option<String> = row.try_get("photo_started_at").map_err(backend)?;
    let photo_completed_at: Option<String> = row.try_get("photo_completed_at").map_err(backend)?;
    let video_started_at: Option<String> = row.try_get("video_started_at").map_err(backend)?;
    let video_completed_at: Option<String> = row.try_get("video_completed_at").map_err(backend)?;
    let first_visibility_day: i64 = row.try_get("first_visibility_day").map_err(backend)?;
    let expected_completion_day: i64 = row.try_get("expected_completion_day").map_err(backend)?;

    Ok(MediaTransfer::from_parts(
        TransferId::new(id).map_err(|e| StoreError::Backend(e.to_string()))?,
        MigrationId::new(migration_id),
        source_photo_count,
        source_video_count,
        source_storage_gb,
        google_photos_baseline_gb,
        google_drive_baseline_gb,
        google_mail_baseline_gb,
        parse_enum::<MediaKindStatus>(&photo_status_str)?,
        parse_enum::<MediaKindStatus>(&video_status_str)?,
        parse_datetime(&initiated_at_str)?,
        parse_optional_datetime(photo_started_at)?,
        parse_optional_datetime(photo_completed_at)?,
        parse_optional_datetime(video_started_at)?,
        parse_optional_datetime(video_completed_at)?,
        first_visibility_day as i32,
        expected_completion_day as i32,
    ))
}

fn map_snapshot(row: &SqliteRow) -> Result<StorageSnapshot, StoreError> {
    let id: i64 = row.try_get("id").map_err(backend)?;
    let migration_id: i64 = row.try_get("migration_id").map_err(backend)?;
    let day_number: i64 = row.try_get("day_number").map_err(backend)?;
    let captured_at_str: String = row.try_get("captured_at").map_err(backend)?;
    let google_photos_gb: f64 = row.try_get("google_photos_gb").map_err(backend)?;
    let google_drive_gb: f64 = row.try_get("google_drive_gb").map_err(backend)?;
    let google_mail_gb: f64 = row.try_get("google_mail_gb").map_err(backend)?;
    let device_backup_gb: f64 = row.try_get("device_backup_gb").map_err(backend)?;
    let growth_from_baseline_gb: f64 = row.try_get("growth_from_baseline_gb").map_err(backend)?;
    let estimated_photos_transferred: i64 =
        row.try_get("estimated_photos_transferred").map_err(backend)?;
    let estimated_videos_transferred: i64 =
        row.try_get("estimated_videos_transferred").map_err(backend)?;
    let percent_complete: f64 = row.try_get("percent_complete").map_err(backend)?;
    let is_baseline: bool = row.try_get("is_baseline").map_err(backend)?;

    Ok(StorageSnapshot::new(
        SnapshotId::new(id),
        MigrationId::new(migration_id),
        day_number as i32,
        parse_datetime(&captured_at_str)?,
        google_photos_gb,
        google_drive_gb,
        google_mail_gb,
        device_backup_gb,
        growth_from_baseline_gb,
        estimated_photos_transferred,
        estimated_videos_transferred,
        percent_complete,
        is_baseline,
    ))
}

fn map_daily(row: &SqliteRow) -> Result<DailyProgress, StoreError> {
    let migration_id: i64 = row.try_get("migration_id").map_err(backend)?;
    let day_number: i64 = row.try_get("day_number").map_err(backend)?;
    let date_str: String = row.try_get("date").map_err(backend)?;
    let photos_transferred_estimate: i64 =
        row.try_get("photos_transferred_estimate").map_err(backend)?;
    let videos_transferred_estimate: i64 =
        row.try_get("videos_transferred_estimate").map_err(backend)?;
    let size_transferred_gb: f64 = row.try_get("size_transferred_gb").map_err(backend)?;
    let storage_percent_complete: f64 = row.try_get("storage_percent_complete").map_err(backend)?;
    let service_adoption_counts_str: String =
        row.try_get("service_adoption_counts").map_err(backend)?;
    let key_milestone: String = row.try_get("key_milestone").map_err(backend)?;
    let notes: Option<String> = row.try_get("notes").map_err(backend)?;
    let updated_at_str: String = row.try_get("updated_at").map_err(backend)?;

    let service_adoption_counts: HashMap<Service, u32> =
        serde_json::from_str::<HashMap<String, u32>>(&service_adoption_counts_str)
            .map_err(|e| StoreError::Backend(format!("invalid service_adoption_counts JSON: {e}")))?
            .into_iter()
            .map(|(k, v)| parse_enum::<Service>(&k).map(|svc| (svc, v)))
            .collect::<Result<_, StoreError>>()?;

    Ok(DailyProgress {
        migration_id: MigrationId::new(migration_id),
        day_number: day_number as i32,
        date: parse_date(&date_str)?,
        photos_transferred_estimate,
        videos_transferred_estimate,
        size_transferred_gb,
        storage_percent_complete,
        service_adoption_counts,
        key_milestone,
        notes,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}

// ============================================================================
// IStateRepository implementation
// ============================================================================

#[async_trait::async_trait]
impl IStateRepository for SqliteStateRepository {
    async fn get_active_migration(&self) -> Result<Option<Migration>, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM migrations WHERE completed_at IS NULL ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(map_migration).transpose()
    }

    async fn create_migration(
        &self,
        user_name: &str,
        years_on_source: i32,
        started_at: DateTime<Utc>,
    ) -> Result<Migration, StoreError> {
        if self.get_active_migration().await?.is_some() {
            return Err(StoreError::AlreadyActive);
        }

        let id = sqlx::query(
            "INSERT INTO migrations (user_name, years_on_source, phase, overall_progress, started_at)
             VALUES (?, ?, 'initialization', 0, ?)",
        )
        .bind(user_name)
        .bind(i64::from(years_on_source))
        .bind(started_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(backend)?
        .last_insert_rowid();

        self.get_migration(MigrationId::new(id)).await
    }

    async fn get_migration(&self, id: MigrationId) -> Result<Migration, StoreError> {
        let row = sqlx::query("SELECT * FROM migrations WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::NotFound(format!("migration {id} not found")))?;
        map_migration(&row)
    }

    async fn update_migration(
        &self,
        id: MigrationId,
        update: &MigrationUpdate,
    ) -> Result<Migration, StoreError> {
        let current = self.get_migration(id).await?;
        let next = current.apply_update(update)?;

        sqlx::query(
            "UPDATE migrations SET
                photo_count = ?, video_count = ?, total_icloud_storage_gb = ?,
                google_photos_baseline_gb = ?, google_drive_baseline_gb = ?,
                google_mail_baseline_gb = ?, family_size = ?, family_group_name = ?,
                phase = ?, overall_progress = ?, completed_at = ?
             WHERE id = ?",
        )
        .bind(next.photo_count())
        .bind(next.video_count())
        .bind(next.total_icloud_storage_gb())
        .bind(next.google_photos_baseline_gb())
        .bind(next.google_drive_baseline_gb())
        .bind(next.google_mail_baseline_gb())
        .bind(next.family_size().map(i64::from))
        .bind(next.family_group_name())
        .bind(next.phase().to_string())
        .bind(i64::from(next.overall_progress()))
        .bind(next.completed_at().map(|dt| dt.to_rfc3339()))
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(next)
    }

    async fn add_family_member(
        &self,
        migration_id: MigrationId,
        display_name: &str,
        role: Role,
        age: Option<i32>,
    ) -> Result<FamilyMember, StoreError> {
        let id = sqlx::query(
            "INSERT INTO family_members (migration_id, display_name, role, age)
             VALUES (?, ?, ?, ?)",
        )
        .bind(migration_id.as_i64())
        .bind(display_name)
        .bind(role.to_string())
        .bind(age.map(i64::from))
        .execute(&self.pool)
        .await
        .map_err(backend)?
        .last_insert_rowid();

        let row = sqlx::query("SELECT * FROM family_members WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        map_family_member(&row)
    }

    async fn get_family_member_by_name(
        &self,
        migration_id: MigrationId,
        display_name: &str,
    ) -> Result<FamilyMember, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM family_members WHERE migration_id = ? AND display_name = ?",
        )
        .bind(migration_id.as_i64())
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or_else(|| StoreError::NotFound(format!("family member {display_name} not found")))?;
        map_family_member(&row)
    }

    async fn get_family_members(
        &self,
        migration_id: MigrationId,
        filter: FamilyMemberFilter,
    ) -> Result<Vec<FamilyMemberView>, StoreError> {
        let member_rows = sqlx::query("SELECT * FROM family_members WHERE migration_id = ?")
            .bind(migration_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        let mut views = Vec::with_capacity(member_rows.len());
        for row in &member_rows {
            let member = map_family_member(row)?;
            let adoption_rows =
                sqlx::query("SELECT * FROM family_app_adoptions WHERE family_member_id = ?")
                    .bind(member.id().as_i64())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(backend)?;
            let adoptions = adoption_rows
                .iter()
                .map(map_adoption)
                .collect::<Result<Vec<_>, _>>()?;
            views.push(FamilyMemberView { member, adoptions });
        }

        Ok(views
            .into_iter()
            .filter(|view| match filter {
                FamilyMemberFilter::All => true,
                FamilyMemberFilter::NotInMessagingGroup => {
                    view.status_for(Service::Messaging) != AdoptionStatus::Configured
                        || !view
                            .adoption_for(Service::Messaging)
                            .and_then(FamilyAppAdoption::in_group)
                            .unwrap_or(false)
                }
                FamilyMemberFilter::NotSharingLocation => !view
                    .adoption_for(Service::Location)
                    .and_then(FamilyAppAdoption::location_share_received)
                    .unwrap_or(false),
                FamilyMemberFilter::Teen => view.member.is_teen(),
                FamilyMemberFilter::NoContactHandle => view.member.contact_handle().is_none(),
            })
            .collect())
    }

    async fn get_family_service_summary(
        &self,
        migration_id: MigrationId,
    ) -> Result<FamilyServiceSummary, StoreError> {
        let member_rows = sqlx::query("SELECT id FROM family_members WHERE migration_id = ?")
            .bind(migration_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        let mut summary = FamilyServiceSummary::default();
        for service in Service::ALL {
            let mut counts = FamilyServiceCounts::default();
            for row in &member_rows {
                let member_id: i64 = row.try_get("id").map_err(backend)?;
                let status_row = sqlx::query(
                    "SELECT status FROM family_app_adoptions WHERE family_member_id = ? AND service = ?",
                )
                .bind(member_id)
                .bind(service.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

                let status = match status_row {
                    Some(r) => {
                        let s: String = r.try_get("status").map_err(backend)?;
                        parse_enum::<AdoptionStatus>(&s)?
                    }
                    None => AdoptionStatus::NotStarted,
                };

                counts.total += 1;
                match status {
                    AdoptionStatus::NotStarted => counts.pending += 1,
                    AdoptionStatus::Invited => counts.invited += 1,
                    AdoptionStatus::Installed => counts.installed += 1,
                    AdoptionStatus::Configured => counts.configured += 1,
                }
            }
            match service {
                Service::Messaging => summary.messaging = counts,
                Service::Location => summary.location = counts,
                Service::Payments => summary.payments = counts,
            }
        }
        Ok(summary)
    }

    async fn upsert_family_app_adoption(
        &self,
        _migration_id: MigrationId,
        member_id: FamilyMemberId,
        service: Service,
        status: AdoptionStatus,
        details: Option<AdoptionDetails>,
        now: DateTime<Utc>,
    ) -> Result<FamilyAppAdoption, StoreError> {
        let existing = sqlx::query(
            "SELECT * FROM family_app_adoptions WHERE family_member_id = ? AND service = ?",
        )
        .bind(member_id.as_i64())
        .bind(service.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        let mut adoption = match existing {
            Some(row) => map_adoption(&row)?,
            None => {
                sqlx::query(
                    "INSERT INTO family_app_adoptions (family_member_id, service, status)
                     VALUES (?, ?, 'not_started')",
                )
                .bind(member_id.as_i64())
                .bind(service.to_string())
                .execute(&self.pool)
                .await
                .map_err(backend)?;
                let row = sqlx::query(
                    "SELECT * FROM family_app_adoptions WHERE family_member_id = ? AND service = ?",
                )
                .bind(member_id.as_i64())
                .bind(service.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(backend)?;
                map_adoption(&row)?
            }
        };

        adoption.transition_to(status, now);
        if let Some(details) = details {
            adoption.apply_details(&details);
        }

        sqlx::query(
            "UPDATE family_app_adoptions SET
                status = ?, invited_at = ?, installed_at = ?, configured_at = ?,
                in_group = ?, location_share_sent = ?, location_share_received = ?,
                card_activated = ?, card_last_four = ?
             WHERE id = ?",
        )
        .bind(adoption.status().to_string())
        .bind(adoption.invited_at().map(|dt| dt.to_rfc3339()))
        .bind(adoption.installed_at().map(|dt| dt.to_rfc3339()))
        .bind(adoption.configured_at().map(|dt| dt.to_rfc3339()))
        .bind(adoption.in_group())
        .bind(adoption.location_share_sent())
        .bind(adoption.location_share_received())
        .bind(adoption.card_activated())
        .bind(adoption.card_last_four())
        .bind(adoption.id().as_i64())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(adoption)
    }

    async fn create_media_transfer(&self, transfer: &MediaTransfer) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO media_transfers (
                id, migration_id, source_photo_count, source_video_count, source_storage_gb,
                google_photos_baseline_gb, google_drive_baseline_gb, google_mail_baseline_gb,
                photo_status, video_status, initiated_at,
                photo_started_at, photo_completed_at, video_started_at, video_completed_at,
                first_visibility_day, expected_completion_day
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(transfer.id().as_str())
        .bind(transfer.migration_id().as_i64())
        .bind(transfer.source_photo_count())
        .bind(transfer.source_video_count())
        .bind(transfer.source_storage_gb())
        .bind(transfer.google_photos_baseline_gb())
        .bind(transfer.google_drive_baseline_gb())
        .bind(transfer.google_mail_baseline_gb())
        .bind(transfer.photo_status().to_string())
        .bind(transfer.video_status().to_string())
        .bind(transfer.initiated_at().to_rfc3339())
        .bind(transfer.photo_started_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.photo_completed_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.video_started_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.video_completed_at().map(|dt| dt.to_rfc3339()))
        .bind(i64::from(transfer.first_visibility_day()))
        .bind(i64::from(transfer.expected_completion_day()))
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_media_transfer(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<MediaTransfer>, StoreError> {
        let row = sqlx::query("SELECT * FROM media_transfers WHERE migration_id = ?")
            .bind(migration_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        row.as_ref().map(map_transfer).transpose()
    }

    async fn get_media_transfer_by_id(
        &self,
        transfer_id: &TransferId,
    ) -> Result<MediaTransfer, StoreError> {
        let row = sqlx::query("SELECT * FROM media_transfers WHERE id = ?")
            .bind(transfer_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::NotFound(format!("transfer {transfer_id} not found")))?;
        map_transfer(&row)
    }

    async fn update_media_transfer(&self, transfer: &MediaTransfer) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE media_transfers SET
                photo_status = ?, video_status = ?,
                photo_started_at = ?, photo_completed_at = ?,
                video_started_at = ?, video_completed_at = ?
             WHERE id = ?",
        )
        .bind(transfer.photo_status().to_string())
        .bind(transfer.video_status().to_string())
        .bind(transfer.photo_started_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.photo_completed_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.video_started_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.video_completed_at().map(|dt| dt.to_rfc3339()))
        .bind(transfer.id().as_str())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    /// Appends the snapshot (E5) and upserts the daily progress row (E6)
    /// inside one transaction, so a crash between the two writes leaves
    /// neither applied.
    async fn record_progress(
        &self,
        snapshot: StorageSnapshot,
        daily: DailyProgress,
    ) -> Result<StorageSnapshot, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let counts_json = serde_json::to_string(
            &daily
                .service_adoption_counts
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<String, u32>>(),
        )
        .map_err(|e| StoreError::Backend(format!("failed to serialize service counts: {e}")))?;

        let id = sqlx::query(
            "INSERT INTO storage_snapshots (
                migration_id, day_number, captured_at, google_photos_gb, google_drive_gb,
                google_mail_gb, device_backup_gb, total_used_gb, growth_from_baseline_gb,
                estimated_photos_transferred, estimated_videos_transferred, percent_complete,
                is_baseline
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(snapshot.migration_id().as_i64())
        .bind(i64::from(snapshot.day_number()))
        .bind(snapshot.captured_at().to_rfc3339())
        .bind(snapshot.google_photos_gb())
        .bind(snapshot.google_drive_gb())
        .bind(snapshot.google_mail_gb())
        .bind(snapshot.device_backup_gb())
        .bind(snapshot.total_used_gb())
        .bind(snapshot.growth_from_baseline_gb())
        .bind(snapshot.estimated_photos_transferred())
        .bind(snapshot.estimated_videos_transferred())
        .bind(snapshot.percent_complete())
        .bind(snapshot.is_baseline())
        .execute(&mut *tx)
        .await
        .map_err(backend)?
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO daily_progress (
                migration_id, day_number, date, photos_transferred_estimate,
                videos_transferred_estimate, size_transferred_gb, storage_percent_complete,
                service_adoption_counts, key_milestone, notes, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (migration_id, day_number) DO UPDATE SET
                date = excluded.date,
                photos_transferred_estimate = excluded.photos_transferred_estimate,
                videos_transferred_estimate = excluded.videos_transferred_estimate,
                size_transferred_gb = excluded.size_transferred_gb,
                storage_percent_complete = excluded.storage_percent_complete,
                service_adoption_counts = excluded.service_adoption_counts,
                key_milestone = excluded.key_milestone,
                notes = excluded.notes,
                updated_at = excluded.updated_at",
        )
        .bind(daily.migration_id.as_i64())
        .bind(i64::from(daily.day_number))
        .bind(daily.date.format("%Y-%m-%d").to_string())
        .bind(daily.photos_transferred_estimate)
        .bind(daily.videos_transferred_estimate)
        .bind(daily.size_transferred_gb)
        .bind(daily.storage_percent_complete)
        .bind(counts_json)
        .bind(&daily.key_milestone)
        .bind(&daily.notes)
        .bind(daily.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(backend)?;

        tx.commit().await.map_err(backend)?;

        Ok(snapshot.with_id(SnapshotId::new(id)))
    }

    async fn get_latest_snapshot(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<StorageSnapshot>, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM storage_snapshots WHERE migration_id = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(migration_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(map_snapshot).transpose()
    }

    async fn get_baseline_snapshot(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<StorageSnapshot>, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM storage_snapshots WHERE migration_id = ? AND is_baseline = 1 LIMIT 1",
        )
        .bind(migration_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(map_snapshot).transpose()
    }

    async fn list_storage_snapshots(
        &self,
        migration_id: MigrationId,
    ) -> Result<Vec<StorageSnapshot>, StoreError> {
        let rows = sqlx::query("SELECT * FROM storage_snapshots WHERE migration_id = ? ORDER BY id")
            .bind(migration_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        rows.iter().map(map_snapshot).collect()
    }

    async fn get_daily_progress(
        &self,
        migration_id: MigrationId,
        day_number: i32,
    ) -> Result<Option<DailyProgress>, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM daily_progress WHERE migration_id = ? AND day_number = ?",
        )
        .bind(migration_id.as_i64())
        .bind(i64::from(day_number))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        row.as_ref().map(map_daily).transpose()
    }

    async fn list_daily_progress(
        &self,
        migration_id: MigrationId,
    ) -> Result<Vec<DailyProgress>, StoreError> {
        let rows = sqlx::query(
            "SELECT * FROM daily_progress WHERE migration_id = ? ORDER BY day_number",
        )
        .bind(migration_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        rows.iter().map(map_daily).collect()
    }

    async fn get_overview(&self, migration_id: MigrationId) -> Result<MigrationOverview, StoreError> {
        let migration = self.get_migration(migration_id).await?;
        let latest_snapshot = self.get_latest_snapshot(migration_id).await?;
        let latest_daily = {
            let mut all = self.list_daily_progress(migration_id).await?;
            all.sort_by_key(|d| d.day_number);
            all.pop()
        };
        Ok(MigrationOverview {
            migration,
            latest_snapshot,
            latest_daily,
        })
    }

    async fn get_daily_summary(
        &self,
        migration_id: MigrationId,
        day_number: i32,
    ) -> Result<DailySummary, StoreError> {
        let family_services = self.get_family_service_summary(migration_id).await?;
        let snapshot_for_day = sqlx::query(
            "SELECT * FROM storage_snapshots WHERE migration_id = ? AND day_number = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(migration_id.as_i64())
        .bind(i64::from(day_number))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .as_ref()
        .map(map_snapshot)
        .transpose()?;

        Ok(DailySummary {
            day_number,
            expected_milestone: migration_core::progress::milestone_for_day(day_number)
                .unwrap_or_default()
                .to_string(),
            family_services,
            snapshot_for_day,
        })
    }
}
