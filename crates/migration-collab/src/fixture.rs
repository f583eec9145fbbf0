//! Fixture configuration for the deterministic collaborator adapter.
//!
//! Mirrors `migration-core::config`'s `Config::load`/`load_or_default`
//! pattern: a `serde`-derived struct with a literal `Default` impl,
//! loadable from a YAML file when the binary wants a specific demo
//! scenario and falling back to sensible constants otherwise.

use std::path::Path;

use serde::{Deserialize, Serialize};

use migration_core::ports::browser_collaborator::SourceInventory;

/// Source-provider counters reported by `get_source_inventory` (fixed for
/// the life of one fixture — the source side never changes mid-run in this
/// adapter; the source snapshot is a single read taken once at the start).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceFixture {
    pub photos: i64,
    pub videos: i64,
    pub storage_gb: f64,
    pub album_count: i64,
}

impl Default for SourceFixture {
    fn default() -> Self {
        Self {
            photos: 18_400,
            videos: 620,
            storage_gb: 210.0,
            album_count: 34,
        }
    }
}

impl From<SourceFixture> for SourceInventory {
    fn from(f: SourceFixture) -> Self {
        Self {
            photos: f.photos,
            videos: f.videos,
            storage_gb: f.storage_gb,
            album_count: f.album_count,
        }
    }
}

/// Destination baseline reported the moment `initiate_transfer` is called.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineFixture {
    pub photos_gb: f64,
    pub drive_gb: f64,
    pub mail_gb: f64,
}

impl Default for BaselineFixture {
    fn default() -> Self {
        Self {
            photos_gb: 0.0,
            drive_gb: 0.0,
            mail_gb: 0.0,
        }
    }
}

/// A deterministic sequence of destination-photo-storage readings, one per
/// call to `get_destination_photos_storage_gb`. The last reading repeats
/// once exhausted so a run that outlives the fixture's scripted days still
/// returns a stable number rather than panicking.
///
/// Defaults to a seven-entry demo sequence whose shape satisfies the
/// S1-S4 scenarios: no visible growth through day 3, first visible growth
/// on day 4, continued growth through day 6, and a final reading past the
/// Day-7 override threshold (the override itself lives in
/// `migration-core`, not here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollabFixture {
    pub source: SourceFixture,
    pub baseline: BaselineFixture,
    pub destination_photo_readings: Vec<f64>,
    pub known_device_entities: Vec<String>,
}

impl Default for CollabFixture {
    fn default() -> Self {
        Self {
            source: SourceFixture::default(),
            baseline: BaselineFixture::default(),
            destination_photo_readings: vec![0.0, 0.0, 0.0, 4.3, 5.1, 6.0, 7.9],
            known_device_entities: vec![
                "Messages".to_string(),
                "Find My".to_string(),
                "Family Group".to_string(),
            ],
        }
    }
}

impl CollabFixture {
    /// Loads a fixture from a YAML file, falling back to [`Default`] if the
    /// path doesn't exist — the same posture as
    /// `migration_core::config::Config::load_or_default`.
    ///
    /// # Errors
    /// Returns an error if the file exists but fails to parse.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let fixture: Self = serde_yaml::from_str(&raw)?;
        Ok(fixture)
    }
}
