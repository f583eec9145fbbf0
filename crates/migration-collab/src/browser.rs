//! `FixtureBrowserCollaborator` — the one `IBrowserCollaborator` adapter
//! this repository ships.
//!
//! Deterministic and in-memory: no network call, no browser session. It
//! exists so `migration-tools`' T5 (`get_migration_status`) has a real
//! collaborator to call during local exercise of the full T1-T7 flow and
//! in integration tests. The fixture is shipped as the adapter itself
//! rather than a test-only double.

use std::sync::Mutex;

use chrono::Utc;
use migration_core::domain::TransferId;
use migration_core::ports::browser_collaborator::{
    DestinationBaseline, IBrowserCollaborator, SourceInventory, TransferInitiation,
};

use crate::fixture::CollabFixture;

pub struct FixtureBrowserCollaborator {
    fixture: CollabFixture,
    /// Index into `destination_photo_readings` consumed so far; advances by
    /// one on every `get_destination_photos_storage_gb` call.
    cursor: Mutex<usize>,
}

impl FixtureBrowserCollaborator {
    #[must_use]
    pub fn new(fixture: CollabFixture) -> Self {
        Self {
            fixture,
            cursor: Mutex::new(0),
        }
    }
}

impl Default for FixtureBrowserCollaborator {
    fn default() -> Self {
        Self::new(CollabFixture::default())
    }
}

#[async_trait::async_trait]
impl IBrowserCollaborator for FixtureBrowserCollaborator {
    async fn get_source_inventory(&self) -> anyhow::Result<SourceInventory> {
        Ok(self.fixture.source.into())
    }

    async fn initiate_transfer(&self) -> anyhow::Result<TransferInitiation> {
        let transfer_id = TransferId::new(uuid::Uuid::new_v4().to_string())
            .map_err(|e| anyhow::anyhow!(e))?;
        let b = self.fixture.baseline;
        Ok(TransferInitiation {
            transfer_id,
            baseline: DestinationBaseline {
                photos_gb: b.photos_gb,
                drive_gb: b.drive_gb,
                mail_gb: b.mail_gb,
                total_gb: b.photos_gb + b.drive_gb + b.mail_gb,
                captured_at: Utc::now(),
            },
        })
    }

    async fn get_destination_photos_storage_gb(&self) -> anyhow::Result<f64> {
        let readings = &self.fixture.destination_photo_readings;
        if readings.is_empty() {
            return Ok(0.0);
        }
        let mut cursor = self.cursor.lock().unwrap();
        let idx = (*cursor).min(readings.len() - 1);
        *cursor += 1;
        Ok(readings[idx])
    }
}
