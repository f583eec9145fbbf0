//! State repository port (driven/secondary port) — C1
//!
//! This module defines the interface for persisting and querying every
//! entity (E1-E6). This port returns [`StoreError`] rather than an opaque
//! error type: `invariant_violation`/`already_active`/`not_found` must be
//! classified at the point where the old-vs-new row comparison happens,
//! which is here, not in the use-case layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{
    AdoptionDetails, AdoptionStatus, DailyProgress, FamilyAppAdoption, FamilyMember,
    FamilyMemberFilter, FamilyMemberId, MediaTransfer, Migration, MigrationId, MigrationUpdate,
    Role, Service, StoreError, StorageSnapshot, TransferId,
};

/// A Family Member (E2) joined with its Family App Adoption (E3) rows, one
/// per tracked service. A missing service row reads as `not_started`
/// — callers never see an absent adoption, only a default one.
///
/// `Serialize` is derived here (rather than left to the tool-surface crate
/// to re-shape) because this composite record crosses the tool boundary
/// verbatim as part of T6's response and T5's `day_summary`/`family_services`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyMemberView {
    pub member: FamilyMember,
    pub adoptions: Vec<FamilyAppAdoption>,
}

impl FamilyMemberView {
    #[must_use]
    pub fn adoption_for(&self, service: Service) -> Option<&FamilyAppAdoption> {
        self.adoptions.iter().find(|a| a.service() == service)
    }

    #[must_use]
    pub fn status_for(&self, service: Service) -> AdoptionStatus {
        self.adoption_for(service)
            .map_or(AdoptionStatus::NotStarted, FamilyAppAdoption::status)
    }
}

/// Per-service adoption counts returned by `get_family_service_summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FamilyServiceCounts {
    pub total: u32,
    pub invited: u32,
    pub installed: u32,
    pub configured: u32,
    pub pending: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FamilyServiceSummary {
    pub messaging: FamilyServiceCounts,
    pub location: FamilyServiceCounts,
    pub payments: FamilyServiceCounts,
}

/// Composite record for `get_overview`: the Migration row
/// plus its latest Storage Snapshot and latest Daily Progress, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationOverview {
    pub migration: Migration,
    pub latest_snapshot: Option<StorageSnapshot>,
    pub latest_daily: Option<DailyProgress>,
}

/// Composite record for `get_daily_summary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub day_number: i32,
    pub expected_milestone: String,
    pub family_services: FamilyServiceSummary,
    pub snapshot_for_day: Option<StorageSnapshot>,
}

/// Port trait for persistent state storage (C1).
///
/// This is the primary interface for all persistence operations. It covers
/// CRUD and query operations for E1-E6, enforcing the domain invariants
/// (monotonic counters, forward-only adoption status, a single active
/// migration, a single baseline snapshot per migration) at the point of
/// write.
#[async_trait::async_trait]
pub trait IStateRepository: Send + Sync {
    // --- E1: Migration ---

    /// The most recent Migration row with `completed_at IS NULL`
    /// (the "active migration" of the glossary).
    async fn get_active_migration(&self) -> Result<Option<Migration>, StoreError>;

    /// Inserts a new E1 row. Returns `StoreError::AlreadyActive` if an
    /// uncompleted migration already exists.
    async fn create_migration(
        &self,
        user_name: &str,
        years_on_source: i32,
        started_at: DateTime<Utc>,
    ) -> Result<Migration, StoreError>;

    /// Returns `StoreError::NotFound` if no row with this id exists.
    async fn get_migration(&self, id: MigrationId) -> Result<Migration, StoreError>;

    /// Applies only the keys set in `update`. Rejects any value that would
    /// decrease a monotone counter (`photo_count`, `video_count`,
    /// `total_icloud_storage_gb`, `overall_progress`) with
    /// `StoreError::InvariantViolation`.
    async fn update_migration(
        &self,
        id: MigrationId,
        update: &MigrationUpdate,
    ) -> Result<Migration, StoreError>;

    // --- E2: Family Member ---

    async fn add_family_member(
        &self,
        migration_id: MigrationId,
        display_name: &str,
        role: Role,
        age: Option<i32>,
    ) -> Result<FamilyMember, StoreError>;

    /// Resolves a member by display name within a migration. `not_found` if
    /// no member with that name exists (used by T4 to resolve `member_name`).
    async fn get_family_member_by_name(
        &self,
        migration_id: MigrationId,
        display_name: &str,
    ) -> Result<FamilyMember, StoreError>;

    /// Joins E2 with E3 according to the requested filter.
    async fn get_family_members(
        &self,
        migration_id: MigrationId,
        filter: FamilyMemberFilter,
    ) -> Result<Vec<FamilyMemberView>, StoreError>;

    async fn get_family_service_summary(
        &self,
        migration_id: MigrationId,
    ) -> Result<FamilyServiceSummary, StoreError>;

    // --- E3: Family App Adoption ---

    /// Creates the E3 row if absent, then applies the forward-only status
    /// rule and `details` (service-scoped; foreign-service fields are
    /// ignored).
    async fn upsert_family_app_adoption(
        &self,
        migration_id: MigrationId,
        member_id: FamilyMemberId,
        service: Service,
        status: AdoptionStatus,
        details: Option<AdoptionDetails>,
        now: DateTime<Utc>,
    ) -> Result<FamilyAppAdoption, StoreError>;

    // --- E4: Media Transfer ---

    async fn create_media_transfer(&self, transfer: &MediaTransfer) -> Result<(), StoreError>;

    async fn get_media_transfer(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<MediaTransfer>, StoreError>;

    async fn get_media_transfer_by_id(
        &self,
        transfer_id: &TransferId,
    ) -> Result<MediaTransfer, StoreError>;

    async fn update_media_transfer(&self, transfer: &MediaTransfer) -> Result<(), StoreError>;

    // --- E5 + E6: append/upsert as one atomic write ---

    /// Appends a Storage Snapshot and upserts the matching Daily Progress
    /// row in one transaction: the E5 append and E6 upsert triggered by T5
    /// must be atomic with respect to crashes. Returns the persisted
    /// snapshot (with its assigned id).
    async fn record_progress(
        &self,
        snapshot: StorageSnapshot,
        daily: DailyProgress,
    ) -> Result<StorageSnapshot, StoreError>;

    async fn get_latest_snapshot(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<StorageSnapshot>, StoreError>;

    async fn get_baseline_snapshot(
        &self,
        migration_id: MigrationId,
    ) -> Result<Option<StorageSnapshot>, StoreError>;

    async fn list_storage_snapshots(
        &self,
        migration_id: MigrationId,
    ) -> Result<Vec<StorageSnapshot>, StoreError>;

    async fn get_daily_progress(
        &self,
        migration_id: MigrationId,
        day_number: i32,
    ) -> Result<Option<DailyProgress>, StoreError>;

    async fn list_daily_progress(
        &self,
        migration_id: MigrationId,
    ) -> Result<Vec<DailyProgress>, StoreError>;

    // --- Composite reads ---

    async fn get_overview(&self, migration_id: MigrationId) -> Result<MigrationOverview, StoreError>;

    async fn get_daily_summary(
        &self,
        migration_id: MigrationId,
        day_number: i32,
    ) -> Result<DailySummary, StoreError>;
}

/// A day number mapped to its calendar date, anchored on the migration's
/// `started_at` (day 1 = the start date). Shared by the repository
/// implementation and the use cases that build E6 rows.
#[must_use]
pub fn day_to_date(started_at: DateTime<Utc>, day_number: i32) -> NaiveDate {
    started_at.date_naive() + chrono::Duration::days(i64::from(day_number - 1))
}
