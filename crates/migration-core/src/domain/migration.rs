//! Migration entity (E1)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{MigrationId, Phase};

/// One row per migration run. Counters and baselines are nullable and set
/// progressively — a "progressive enrichment" pattern, not a full record
/// up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Migration {
    id: MigrationId,
    user_name: String,
    years_on_source: i32,
    photo_count: Option<i64>,
    video_count: Option<i64>,
    total_icloud_storage_gb: Option<f64>,
    google_photos_baseline_gb: Option<f64>,
    google_drive_baseline_gb: Option<f64>,
    google_mail_baseline_gb: Option<f64>,
    family_size: Option<i32>,
    family_group_name: Option<String>,
    phase: Phase,
    overall_progress: i32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Migration {
    /// Creates a brand-new migration in the `initialization` phase.
    #[must_use]
    pub fn new(id: MigrationId, user_name: String, years_on_source: i32, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_name,
            years_on_source,
            photo_count: None,
            video_count: None,
            total_icloud_storage_gb: None,
            google_photos_baseline_gb: None,
            google_drive_baseline_gb: None,
            google_mail_baseline_gb: None,
            family_size: None,
            family_group_name: None,
            phase: Phase::Initialization,
            overall_progress: 0,
            started_at,
            completed_at: None,
        }
    }

    /// Reconstructs a `Migration` from stored fields (repository row mapping).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: MigrationId,
        user_name: String,
        years_on_source: i32,
        photo_count: Option<i64>,
        video_count: Option<i64>,
        total_icloud_storage_gb: Option<f64>,
        google_photos_baseline_gb: Option<f64>,
        google_drive_baseline_gb: Option<f64>,
        google_mail_baseline_gb: Option<f64>,
        family_size: Option<i32>,
        family_group_name: Option<String>,
        phase: Phase,
        overall_progress: i32,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_name,
            years_on_source,
            photo_count,
            video_count,
            total_icloud_storage_gb,
            google_photos_baseline_gb,
            google_drive_baseline_gb,
            google_mail_baseline_gb,
            family_size,
            family_group_name,
            phase,
            overall_progress,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> MigrationId {
        self.id
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub const fn years_on_source(&self) -> i32 {
        self.years_on_source
    }

    #[must_use]
    pub const fn photo_count(&self) -> Option<i64> {
        self.photo_count
    }

    #[must_use]
    pub const fn video_count(&self) -> Option<i64> {
        self.video_count
    }

    #[must_use]
    pub const fn total_icloud_storage_gb(&self) -> Option<f64> {
        self.total_icloud_storage_gb
    }

    #[must_use]
    pub const fn google_photos_baseline_gb(&self) -> Option<f64> {
        self.google_photos_baseline_gb
    }

    #[must_use]
    pub const fn google_drive_baseline_gb(&self) -> Option<f64> {
        self.google_drive_baseline_gb
    }

    #[must_use]
    pub const fn google_mail_baseline_gb(&self) -> Option<f64> {
        self.google_mail_baseline_gb
    }

    #[must_use]
    pub const fn family_size(&self) -> Option<i32> {
        self.family_size
    }

    #[must_use]
    pub fn family_group_name(&self) -> Option<&str> {
        self.family_group_name.as_deref()
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn overall_progress(&self) -> i32 {
        self.overall_progress
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.completed_at.is_none()
    }

    /// Merges `update` into `self`, enforcing the monotonicity invariant on
    /// `photo_count`, `video_count`, `total_icloud_storage_gb`, and
    /// `overall_progress`. Shared by every `IStateRepository` implementation
    /// so the rule is defined once.
    ///
    /// # Errors
    /// Returns [`StoreError::InvariantViolation`] if any monotone field
    /// would decrease.
    pub fn apply_update(&self, update: &MigrationUpdate) -> Result<Self, super::StoreError> {
        use super::StoreError;

        if let Some(v) = update.photo_count {
            if self.photo_count.is_some_and(|c| v < c) {
                return Err(StoreError::InvariantViolation(
                    "photo_count must not decrease".to_string(),
                ));
            }
        }
        if let Some(v) = update.video_count {
            if self.video_count.is_some_and(|c| v < c) {
                return Err(StoreError::InvariantViolation(
                    "video_count must not decrease".to_string(),
                ));
            }
        }
        if let Some(v) = update.total_icloud_storage_gb {
            if self.total_icloud_storage_gb.is_some_and(|c| v < c) {
                return Err(StoreError::InvariantViolation(
                    "total_icloud_storage_gb must not decrease".to_string(),
                ));
            }
        }
        if let Some(v) = update.overall_progress {
            if v < self.overall_progress {
                return Err(StoreError::InvariantViolation(
                    "overall_progress must not decrease".to_string(),
                ));
            }
        }

        Ok(Self {
            id: self.id,
            user_name: self.user_name.clone(),
            years_on_source: self.years_on_source,
            photo_count: update.photo_count.or(self.photo_count),
            video_count: update.video_count.or(self.video_count),
            total_icloud_storage_gb: update
                .total_icloud_storage_gb
                .or(self.total_icloud_storage_gb),
            google_photos_baseline_gb: update
                .google_photos_baseline_gb
                .or(self.google_photos_baseline_gb),
            google_drive_baseline_gb: update
                .google_drive_baseline_gb
                .or(self.google_drive_baseline_gb),
            google_mail_baseline_gb: update
                .google_mail_baseline_gb
                .or(self.google_mail_baseline_gb),
            family_size: update.family_size.or(self.family_size),
            family_group_name: update
                .family_group_name
                .clone()
                .or_else(|| self.family_group_name.clone()),
            phase: update.phase.unwrap_or(self.phase),
            overall_progress: update.overall_progress.unwrap_or(self.overall_progress),
            started_at: self.started_at,
            completed_at: update.completed_at.or(self.completed_at),
        })
    }
}

/// Closed allow-list of fields `update_migration` / T3 may write. Monotone
/// counters (`photo_count`, `video_count`, `total_icloud_storage_gb`,
/// `overall_progress`) are enforced as non-decreasing by the repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationUpdate {
    pub photo_count: Option<i64>,
    pub video_count: Option<i64>,
    pub total_icloud_storage_gb: Option<f64>,
    pub google_photos_baseline_gb: Option<f64>,
    pub google_drive_baseline_gb: Option<f64>,
    pub google_mail_baseline_gb: Option<f64>,
    pub family_size: Option<i32>,
    pub family_group_name: Option<String>,
    pub phase: Option<Phase>,
    pub overall_progress: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl MigrationUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
