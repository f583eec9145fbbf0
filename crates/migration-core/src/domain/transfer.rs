//! Media Transfer entity (E4) and its per-kind state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{MediaKindStatus, MigrationId, TransferId};

/// One row per migration run, created when the external copy is initiated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTransfer {
    id: TransferId,
    migration_id: MigrationId,
    source_photo_count: i64,
    source_video_count: i64,
    source_storage_gb: f64,
    google_photos_baseline_gb: f64,
    google_drive_baseline_gb: f64,
    google_mail_baseline_gb: f64,
    photo_status: MediaKindStatus,
    video_status: MediaKindStatus,
    initiated_at: DateTime<Utc>,
    photo_started_at: Option<DateTime<Utc>>,
    photo_completed_at: Option<DateTime<Utc>>,
    video_started_at: Option<DateTime<Utc>>,
    video_completed_at: Option<DateTime<Utc>>,
    first_visibility_day: i32,
    expected_completion_day: i32,
}

impl MediaTransfer {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: TransferId,
        migration_id: MigrationId,
        source_photo_count: i64,
        source_video_count: i64,
        source_storage_gb: f64,
        google_photos_baseline_gb: f64,
        google_drive_baseline_gb: f64,
        google_mail_baseline_gb: f64,
        initiated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            migration_id,
            source_photo_count,
            source_video_count,
            source_storage_gb,
            google_photos_baseline_gb,
            google_drive_baseline_gb,
            google_mail_baseline_gb,
            photo_status: MediaKindStatus::Initiated,
            video_status: MediaKindStatus::Initiated,
            initiated_at,
            photo_started_at: None,
            photo_completed_at: None,
            video_started_at: None,
            video_completed_at: None,
            first_visibility_day: 4,
            expected_completion_day: 7,
        }
    }

    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn from_parts(
        id: TransferId,
        migration_id: MigrationId,
        source_photo_count: i64,
        source_video_count: i64,
        source_storage_gb: f64,
        google_photos_baseline_gb: f64,
        google_drive_baseline_gb: f64,
        google_mail_baseline_gb: f64,
        photo_status: MediaKindStatus,
        video_status: MediaKindStatus,
        initiated_at: DateTime<Utc>,
        photo_started_at: Option<DateTime<Utc>>,
        photo_completed_at: Option<DateTime<Utc>>,
        video_started_at: Option<DateTime<Utc>>,
        video_completed_at: Option<DateTime<Utc>>,
        first_visibility_day: i32,
        expected_completion_day: i32,
    ) -> Self {
        Self {
            id,
            migration_id,
            source_photo_count,
            source_video_count,
            source_storage_gb,
            google_photos_baseline_gb,
            google_drive_baseline_gb,
            google_mail_baseline_gb,
            photo_status,
            video_status,
            initiated_at,
            photo_started_at,
            photo_completed_at,
            video_started_at,
            video_completed_at,
            first_visibility_day,
            expected_completion_day,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &TransferId {
        &self.id
    }

    #[must_use]
    pub const fn migration_id(&self) -> MigrationId {
        self.migration_id
    }

    #[must_use]
    pub const fn source_photo_count(&self) -> i64 {
        self.source_photo_count
    }

    #[must_use]
    pub const fn source_video_count(&self) -> i64 {
        self.source_video_count
    }

    #[must_use]
    pub const fn google_photos_baseline_gb(&self) -> f64 {
        self.google_photos_baseline_gb
    }

    #[must_use]
    pub const fn google_drive_baseline_gb(&self) -> f64 {
        self.google_drive_baseline_gb
    }

    #[must_use]
    pub const fn google_mail_baseline_gb(&self) -> f64 {
        self.google_mail_baseline_gb
    }

    #[must_use]
    pub const fn source_storage_gb(&self) -> f64 {
        self.source_storage_gb
    }

    #[must_use]
    pub const fn initiated_at(&self) -> DateTime<Utc> {
        self.initiated_at
    }

    #[must_use]
    pub const fn photo_started_at(&self) -> Option<DateTime<Utc>> {
        self.photo_started_at
    }

    #[must_use]
    pub const fn photo_completed_at(&self) -> Option<DateTime<Utc>> {
        self.photo_completed_at
    }

    #[must_use]
    pub const fn video_started_at(&self) -> Option<DateTime<Utc>> {
        self.video_started_at
    }

    #[must_use]
    pub const fn video_completed_at(&self) -> Option<DateTime<Utc>> {
        self.video_completed_at
    }

    #[must_use]
    pub const fn photo_status(&self) -> MediaKindStatus {
        self.photo_status
    }

    #[must_use]
    pub const fn video_status(&self) -> MediaKindStatus {
        self.video_status
    }

    #[must_use]
    pub const fn first_visibility_day(&self) -> i32 {
        self.first_visibility_day
    }

    #[must_use]
    pub const fn expected_completion_day(&self) -> i32 {
        self.expected_completion_day
    }

    /// Derived overall status: `completed` iff both kinds are `completed`,
    /// otherwise the more advanced of the two.
    #[must_use]
    pub fn overall_status(&self) -> MediaKindStatus {
        use MediaKindStatus::{Completed, InProgress, Initiated, Pending};
        match (self.photo_status, self.video_status) {
            (Completed, Completed) => Completed,
            (InProgress, _) | (_, InProgress) => InProgress,
            (Initiated, _) | (_, Initiated) => Initiated,
            (Pending, Pending) => Pending,
        }
    }

    /// Advances both kinds to `in_progress` on the first snapshot showing
    /// growth on day >= 4.
    pub fn mark_first_visibility(&mut self, day_number: i32, growth_gb: f64, now: DateTime<Utc>) {
        if growth_gb <= 0.0 || day_number < self.first_visibility_day {
            return;
        }
        if self.photo_status == MediaKindStatus::Initiated {
            self.photo_status = MediaKindStatus::InProgress;
            self.photo_started_at.get_or_insert(now);
        }
        if self.video_status == MediaKindStatus::Initiated {
            self.video_status = MediaKindStatus::InProgress;
            self.video_started_at.get_or_insert(now);
        }
    }

    /// Marks both kinds `completed` once day 7 reaches the progress engine.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.photo_status = MediaKindStatus::Completed;
        self.photo_completed_at.get_or_insert(now);
        self.video_status = MediaKindStatus::Completed;
        self.video_completed_at.get_or_insert(now);
    }
}
