//! Storage Snapshot entity (E5) — an append-only observability log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{MigrationId, SnapshotId};

/// One append-only row per destination-storage reading. The earliest row for
/// a migration with `is_baseline = true` anchors all later growth
/// calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSnapshot {
    id: SnapshotId,
    migration_id: MigrationId,
    day_number: i32,
    captured_at: DateTime<Utc>,
    google_photos_gb: f64,
    google_drive_gb: f64,
    google_mail_gb: f64,
    device_backup_gb: f64,
    total_used_gb: f64,
    growth_from_baseline_gb: f64,
    estimated_photos_transferred: i64,
    estimated_videos_transferred: i64,
    percent_complete: f64,
    is_baseline: bool,
}

impl StorageSnapshot {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: SnapshotId,
        migration_id: MigrationId,
        day_number: i32,
        captured_at: DateTime<Utc>,
        google_photos_gb: f64,
        google_drive_gb: f64,
        google_mail_gb: f64,
        device_backup_gb: f64,
        growth_from_baseline_gb: f64,
        estimated_photos_transferred: i64,
        estimated_videos_transferred: i64,
        percent_complete: f64,
        is_baseline: bool,
    ) -> Self {
        let total_used_gb = google_photos_gb + google_drive_gb + google_mail_gb + device_backup_gb;
        Self {
            id,
            migration_id,
            day_number,
            captured_at,
            google_photos_gb,
            google_drive_gb,
            google_mail_gb,
            device_backup_gb,
            total_used_gb,
            growth_from_baseline_gb,
            estimated_photos_transferred,
            estimated_videos_transferred,
            percent_complete,
            is_baseline,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SnapshotId {
        self.id
    }

    /// Re-stamps the id after the store assigns one on insert.
    #[must_use]
    pub const fn with_id(mut self, id: SnapshotId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub const fn migration_id(&self) -> MigrationId {
        self.migration_id
    }

    #[must_use]
    pub const fn day_number(&self) -> i32 {
        self.day_number
    }

    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    #[must_use]
    pub const fn google_photos_gb(&self) -> f64 {
        self.google_photos_gb
    }

    #[must_use]
    pub const fn google_drive_gb(&self) -> f64 {
        self.google_drive_gb
    }

    #[must_use]
    pub const fn google_mail_gb(&self) -> f64 {
        self.google_mail_gb
    }

    #[must_use]
    pub const fn device_backup_gb(&self) -> f64 {
        self.device_backup_gb
    }

    #[must_use]
    pub const fn total_used_gb(&self) -> f64 {
        self.total_used_gb
    }

    #[must_use]
    pub const fn growth_from_baseline_gb(&self) -> f64 {
        self.growth_from_baseline_gb
    }

    #[must_use]
    pub const fn estimated_photos_transferred(&self) -> i64 {
        self.estimated_photos_transferred
    }

    #[must_use]
    pub const fn estimated_videos_transferred(&self) -> i64 {
        self.estimated_videos_transferred
    }

    #[must_use]
    pub const fn percent_complete(&self) -> f64 {
        self.percent_complete
    }

    #[must_use]
    pub const fn is_baseline(&self) -> bool {
        self.is_baseline
    }
}

/// Fields needed to append a new snapshot; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStorageSnapshot {
    pub migration_id: MigrationId,
    pub day_number: i32,
    pub captured_at: DateTime<Utc>,
    pub google_photos_gb: f64,
    pub google_drive_gb: f64,
    pub google_mail_gb: f64,
    pub device_backup_gb: f64,
    pub growth_from_baseline_gb: f64,
    pub estimated_photos_transferred: i64,
    pub estimated_videos_transferred: i64,
    pub percent_complete: f64,
    pub is_baseline: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_used_gb_sums_all_four_services() {
        let snapshot = StorageSnapshot::new(
            SnapshotId::new(1),
            MigrationId::new(1),
            4,
            Utc::now(),
            4.3,
            0.2,
            0.1,
            0.0,
            2.8,
            308,
            5,
            28.0,
            false,
        );
        assert!((snapshot.total_used_gb() - 4.6).abs() < 1e-9);
    }
}
