//! Daily Progress entity (E6) — a per-day upserted summary row

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{MigrationId, Service};

/// One row per (migration, day). Upserted once per day; the last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub migration_id: MigrationId,
    pub day_number: i32,
    pub date: NaiveDate,
    pub photos_transferred_estimate: i64,
    pub videos_transferred_estimate: i64,
    pub size_transferred_gb: f64,
    pub storage_percent_complete: f64,
    pub service_adoption_counts: HashMap<Service, u32>,
    pub key_milestone: String,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl DailyProgress {
    #[must_use]
    pub fn service_count(&self, service: Service) -> u32 {
        self.service_adoption_counts.get(&service).copied().unwrap_or(0)
    }
}
