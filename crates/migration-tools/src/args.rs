//! Argument records for the seven tool-surface operations.
//!
//! Each struct derives both `serde::Deserialize` (for the MCP transport's
//! JSON-RPC payload) and `schemars::JsonSchema` (so `migration-agent` can
//! advertise the tool's input schema to the agent runtime without hand
//! maintaining a second copy). Enum-shaped fields (`status`, `service`,
//! `role`, `format`, `filter`) are plain strings here; they are parsed
//! against the domain's closed enumerations at dispatch time so an
//! unrecognized value surfaces as `invalid_argument` rather than a
//! deserialization panic.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InitializeMigrationArgs {
    pub user_name: String,
    pub years_on_source: i32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddFamilyMemberArgs {
    pub migration_id: i64,
    pub name: String,
    /// One of `spouse`, `child`, `other`.
    pub role: String,
    #[serde(default)]
    pub age: Option<i32>,
}

/// Allow-listed progressive-enrichment fields for `update_migration_status`.
/// All fields are optional; only the keys present in the request are
/// applied, matched against the allow-list of E1 columns
/// [`MigrationUpdate`](migration_core::domain::MigrationUpdate) exposes.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateMigrationStatusArgs {
    pub migration_id: i64,
    #[serde(default)]
    pub photo_count: Option<i64>,
    #[serde(default)]
    pub video_count: Option<i64>,
    #[serde(default)]
    pub total_icloud_storage_gb: Option<f64>,
    #[serde(default)]
    pub google_photos_baseline_gb: Option<f64>,
    #[serde(default)]
    pub google_drive_baseline_gb: Option<f64>,
    #[serde(default)]
    pub google_mail_baseline_gb: Option<f64>,
    #[serde(default)]
    pub family_size: Option<i32>,
    #[serde(default)]
    pub family_group_name: Option<String>,
    /// One of `initialization`, `media_transfer`, `family_setup`,
    /// `validation`, `completed`.
    #[serde(default)]
    pub current_phase: Option<String>,
    #[serde(default)]
    pub overall_progress: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AdoptionDetailsArgs {
    #[serde(default)]
    pub in_group: Option<bool>,
    #[serde(default)]
    pub location_share_sent: Option<bool>,
    #[serde(default)]
    pub location_share_received: Option<bool>,
    #[serde(default)]
    pub card_activated: Option<bool>,
    #[serde(default)]
    pub card_last_four: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateFamilyMemberAppsArgs {
    pub migration_id: i64,
    pub member_name: String,
    /// One of `messaging`, `location`, `payments`.
    pub service: String,
    /// One of `not_started`, `invited`, `installed`, `configured`.
    pub status: String,
    #[serde(default)]
    pub details: Option<AdoptionDetailsArgs>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMigrationStatusArgs {
    pub migration_id: i64,
    pub day_number: i32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFamilyMembersArgs {
    pub migration_id: i64,
    /// One of `all`, `not_in_messaging_group`, `not_sharing_location`,
    /// `teen`, `no_contact_handle`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateMigrationReportArgs {
    pub migration_id: i64,
    /// One of `summary`, `detailed`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "summary".to_string()
}
