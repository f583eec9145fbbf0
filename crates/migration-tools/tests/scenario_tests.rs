//! Scenario tests for the seven-tool surface (S1-S6), driven through
//! [`MigrationTools`] directly against a real (in-memory) SQLite
//! repository, exercising use cases against a migrated `DatabasePool`
//! rather than a fake.

use std::sync::Arc;

use migration_audit::{AuditLogger, AuditStore};
use migration_core::ports::browser_collaborator::{
    DestinationBaseline, SourceInventory, TransferInitiation,
};
use migration_core::ports::device_collaborator::DeviceObservation;
use migration_core::ports::{IBrowserCollaborator, IDeviceCollaborator, IStateRepository};
use migration_store::{DatabasePool, SqliteStateRepository};
use migration_tools::args::{
    AddFamilyMemberArgs, AdoptionDetailsArgs, GenerateMigrationReportArgs, GetFamilyMembersArgs,
    GetMigrationStatusArgs, InitializeMigrationArgs, UpdateFamilyMemberAppsArgs,
    UpdateMigrationStatusArgs,
};
use migration_tools::MigrationTools;

/// A browser collaborator whose destination-photo reading is fixed for the
/// lifetime of the test, mirroring `FixedCollaborator` in
/// `migration-core`'s own `get_migration_status` unit tests.
struct FixedBrowser {
    destination_photos_gb: f64,
}

#[async_trait::async_trait]
impl IBrowserCollaborator for FixedBrowser {
    async fn get_source_inventory(&self) -> anyhow::Result<SourceInventory> {
        Ok(SourceInventory {
            photos: 1000,
            videos: 50,
            storage_gb: 10.0,
            album_count: 12,
        })
    }

    async fn initiate_transfer(&self) -> anyhow::Result<TransferInitiation> {
        Ok(TransferInitiation {
            transfer_id: migration_core::domain::TransferId::new("xfer-1".to_string()).unwrap(),
            baseline: DestinationBaseline {
                photos_gb: 1.5,
                drive_gb: 0.2,
                mail_gb: 0.1,
                total_gb: 1.8,
                captured_at: chrono::Utc::now(),
            },
        })
    }

    async fn get_destination_photos_storage_gb(&self) -> anyhow::Result<f64> {
        Ok(self.destination_photos_gb)
    }
}

struct NullDevice;

#[async_trait::async_trait]
impl IDeviceCollaborator for NullDevice {
    async fn run_commands(&self, _commands: &[String]) -> anyhow::Result<DeviceObservation> {
        Ok(DeviceObservation::default())
    }
}

async fn tools_with_destination_reading(destination_photos_gb: f64) -> MigrationTools {
    let pool = DatabasePool::in_memory()
        .await
        .expect("in-memory pool migrates cleanly");
    let repo: Arc<dyn IStateRepository> =
        Arc::new(SqliteStateRepository::new(pool.pool().clone()));
    let browser: Arc<dyn IBrowserCollaborator> = Arc::new(FixedBrowser {
        destination_photos_gb,
    });
    let device: Arc<dyn IDeviceCollaborator> = Arc::new(NullDevice);
    let audit = Arc::new(AuditLogger::new(AuditStore::new(pool.pool().clone())));
    MigrationTools::new(repo, browser, device, audit)
}

fn success(value: &serde_json::Value) -> bool {
    value["success"].as_bool().unwrap_or(false)
}

/// S1: a fresh migration bootstraps and day 1 shows zero photo progress.
#[tokio::test]
async fn s1_day_one_bootstrap_reports_zero_progress() {
    let tools = tools_with_destination_reading(0.0).await;

    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Carol".to_string(),
            years_on_source: 10,
        })
        .await;
    assert!(success(&created), "{created}");
    let migration_id = created["migration_id"].as_i64().unwrap();

    let seeded = tools
        .update_migration_status(UpdateMigrationStatusArgs {
            migration_id,
            photo_count: Some(1000),
            video_count: Some(50),
            total_icloud_storage_gb: Some(10.0),
            google_photos_baseline_gb: Some(1.5),
            ..Default::default()
        })
        .await;
    assert!(success(&seeded), "{seeded}");

    let status = tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 1,
        })
        .await;
    assert!(success(&status), "{status}");
    assert_eq!(
        status["photo_progress"]["percent_complete"].as_f64(),
        Some(0.0)
    );
}

/// S2: days 1-3 report zero growth against the baseline when the
/// destination hasn't moved.
#[tokio::test]
async fn s2_day_three_no_growth_stays_at_zero() {
    let tools = tools_with_destination_reading(1.5).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Dana".to_string(),
            years_on_source: 6,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();
    tools
        .update_migration_status(UpdateMigrationStatusArgs {
            migration_id,
            photo_count: Some(1000),
            video_count: Some(50),
            total_icloud_storage_gb: Some(10.0),
            google_photos_baseline_gb: Some(1.5),
            ..Default::default()
        })
        .await;

    let status = tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 3,
        })
        .await;
    assert_eq!(
        status["photo_progress"]["percent_complete"].as_f64(),
        Some(0.0)
    );
}

/// S3: day 4 first visible growth.
#[tokio::test]
async fn s3_day_four_first_visibility() {
    let tools = tools_with_destination_reading(4.3).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Eli".to_string(),
            years_on_source: 3,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();
    tools
        .update_migration_status(UpdateMigrationStatusArgs {
            migration_id,
            photo_count: Some(1000),
            video_count: Some(50),
            total_icloud_storage_gb: Some(10.0),
            google_photos_baseline_gb: Some(1.5),
            ..Default::default()
        })
        .await;

    let status = tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 4,
        })
        .await;
    let percent = status["photo_progress"]["percent_complete"].as_f64().unwrap();
    assert!((percent - 28.0).abs() < 0.1, "got {percent}");
}

/// S4: day 7 always reports 100% / success regardless of computed growth.
#[tokio::test]
async fn s4_day_seven_override_reports_complete() {
    let tools = tools_with_destination_reading(6.0).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Farah".to_string(),
            years_on_source: 8,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();
    tools
        .update_migration_status(UpdateMigrationStatusArgs {
            migration_id,
            photo_count: Some(1000),
            video_count: Some(50),
            total_icloud_storage_gb: Some(10.0),
            google_photos_baseline_gb: Some(1.5),
            ..Default::default()
        })
        .await;

    let status = tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 7,
        })
        .await;
    assert_eq!(
        status["photo_progress"]["percent_complete"].as_f64(),
        Some(100.0)
    );
}

/// S5: `get_family_members` honors the `not_sharing_location` filter.
#[tokio::test]
async fn s5_family_filter_excludes_members_who_have_shared_location() {
    let tools = tools_with_destination_reading(0.0).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Grace".to_string(),
            years_on_source: 12,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();

    for name in ["Sam", "Jordan"] {
        let added = tools
            .add_family_member(AddFamilyMemberArgs {
                migration_id,
                name: name.to_string(),
                role: "child".to_string(),
                age: Some(15),
            })
            .await;
        assert!(success(&added), "{added}");
    }

    let adoption = tools
        .update_family_member_apps(UpdateFamilyMemberAppsArgs {
            migration_id,
            member_name: "Sam".to_string(),
            service: "location".to_string(),
            status: "configured".to_string(),
            details: Some(AdoptionDetailsArgs {
                location_share_received: Some(true),
                ..Default::default()
            }),
        })
        .await;
    assert!(success(&adoption), "{adoption}");

    let all = tools
        .get_family_members(GetFamilyMembersArgs {
            migration_id,
            filter: "all".to_string(),
        })
        .await;
    assert_eq!(all["members"].as_array().unwrap().len(), 2);

    let not_sharing = tools
        .get_family_members(GetFamilyMembersArgs {
            migration_id,
            filter: "not_sharing_location".to_string(),
        })
        .await;
    let remaining = not_sharing["members"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["member"]["display_name"], "Jordan");
}

/// S6: an out-of-range day number is rejected as `invalid_argument` rather
/// than silently clamped.
#[tokio::test]
async fn s6_out_of_range_day_is_rejected() {
    let tools = tools_with_destination_reading(0.0).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Hana".to_string(),
            years_on_source: 1,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();

    let status = tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 0,
        })
        .await;
    assert!(!success(&status));
    assert_eq!(status["error"], "invalid_argument");

    let status = tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 8,
        })
        .await;
    assert!(!success(&status));
    assert_eq!(status["error"], "invalid_argument");
}

/// A second `initialize_migration` call while one is active is rejected
/// with the `already_active` error kind rather than creating a duplicate.
#[tokio::test]
async fn initializing_twice_is_rejected_as_already_active() {
    let tools = tools_with_destination_reading(0.0).await;
    let first = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Ines".to_string(),
            years_on_source: 2,
        })
        .await;
    assert!(success(&first), "{first}");

    let second = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Ines".to_string(),
            years_on_source: 2,
        })
        .await;
    assert!(!success(&second));
    assert_eq!(second["error"], "already_active");
}

/// `generate_migration_report` succeeds once day 7 has been recorded, and
/// round-trips the `detailed` format choice.
#[tokio::test]
async fn generate_migration_report_after_day_seven() {
    let tools = tools_with_destination_reading(6.0).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Jo".to_string(),
            years_on_source: 5,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();
    tools
        .update_migration_status(UpdateMigrationStatusArgs {
            migration_id,
            photo_count: Some(1000),
            video_count: Some(50),
            total_icloud_storage_gb: Some(10.0),
            google_photos_baseline_gb: Some(1.5),
            ..Default::default()
        })
        .await;
    tools
        .get_migration_status(GetMigrationStatusArgs {
            migration_id,
            day_number: 7,
        })
        .await;

    let report = tools
        .generate_migration_report(GenerateMigrationReportArgs {
            migration_id,
            format: "detailed".to_string(),
        })
        .await;
    assert!(success(&report), "{report}");
}

/// A malformed enum-shaped string field surfaces as `invalid_argument`
/// rather than a transport-level deserialization failure.
#[tokio::test]
async fn unknown_role_string_is_invalid_argument() {
    let tools = tools_with_destination_reading(0.0).await;
    let created = tools
        .initialize_migration(InitializeMigrationArgs {
            user_name: "Kai".to_string(),
            years_on_source: 4,
        })
        .await;
    let migration_id = created["migration_id"].as_i64().unwrap();

    let added = tools
        .add_family_member(AddFamilyMemberArgs {
            migration_id,
            name: "Unknown".to_string(),
            role: "cousin-twice-removed".to_string(),
            age: None,
        })
        .await;
    assert!(!success(&added));
    assert_eq!(added["error"], "invalid_argument");
}
