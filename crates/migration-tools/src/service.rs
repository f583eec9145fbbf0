//! `MigrationTools` — the seven named operations of the tool surface, as
//! plain async methods returning `serde_json::Value`.
//!
//! This is the MCP-transport-independent half of C3: `migration-agent`'s
//! `#[tool_router]` wrapper (see `migration-tools::server`) is a thin shim
//! over these methods. Every method here follows the same shape:
//! parse/validate the request's string-enum fields, delegate to a
//! `migration-core` use case, record one audit entry (E8), and convert the
//! result to a `{success, ..}` record. None of these methods ever panics or
//! lets an `Err` escape the tool boundary.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use migration_core::domain::{
    AdoptionDetails, AdoptionStatus, FamilyMemberFilter, MigrationId, MigrationUpdate, Phase,
    ReportFormat, Role, Service, ToolError,
};
use migration_core::ports::{IBrowserCollaborator, IDeviceCollaborator, IStateRepository};
use migration_core::usecases;
use migration_audit::AuditLogger;
use serde_json::{json, Value};

use crate::args::{
    AddFamilyMemberArgs, GenerateMigrationReportArgs, GetFamilyMembersArgs,
    GetMigrationStatusArgs, InitializeMigrationArgs, UpdateFamilyMemberAppsArgs,
    UpdateMigrationStatusArgs,
};
use crate::responses::{err, ok};

/// The tool surface's runtime dependencies, shared across every call. The
/// core assumes a single active caller; the `Arc`s allow the MCP transport
/// to hand out one `MigrationTools` per connection without cloning the
/// adapters themselves.
#[derive(Clone)]
pub struct MigrationTools {
    repo: Arc<dyn IStateRepository>,
    browser: Arc<dyn IBrowserCollaborator>,
    device: Arc<dyn IDeviceCollaborator>,
    audit: Arc<AuditLogger>,
}

impl MigrationTools {
    #[must_use]
    pub fn new(
        repo: Arc<dyn IStateRepository>,
        browser: Arc<dyn IBrowserCollaborator>,
        device: Arc<dyn IDeviceCollaborator>,
        audit: Arc<AuditLogger>,
    ) -> Self {
        Self {
            repo,
            browser,
            device,
            audit,
        }
    }

    /// T1: starts a new migration run.
    pub async fn initialize_migration(&self, args: InitializeMigrationArgs) -> Value {
        let started = Instant::now();
        let result = usecases::initialize_migration(
            self.repo.as_ref(),
            &args.user_name,
            args.years_on_source,
            Utc::now(),
        )
        .await;
        self.record(
            "initialize_migration",
            None,
            json!({"user_name": args.user_name, "years_on_source": args.years_on_source}),
            &result,
            started,
        )
        .await;
        match result {
            Ok(migration) => ok(json!({ "migration_id": migration.id().as_i64() })),
            Err(e) => err(&e),
        }
    }

    /// T2: registers a household member.
    pub async fn add_family_member(&self, args: AddFamilyMemberArgs) -> Value {
        let started = Instant::now();
        let migration_id = MigrationId::new(args.migration_id);
        let outcome = self.add_family_member_inner(migration_id, &args).await;
        self.record(
            "add_family_member",
            Some(migration_id),
            json!({"name": args.name, "role": args.role, "age": args.age}),
            &outcome,
            started,
        )
        .await;
        match outcome {
            Ok(member) => ok(json!({ "member_id": member.id().as_i64() })),
            Err(e) => err(&e),
        }
    }

    async fn add_family_member_inner(
        &self,
        migration_id: MigrationId,
        args: &AddFamilyMemberArgs,
    ) -> Result<migration_core::domain::FamilyMember, ToolError> {
        let role = Role::from_str(&args.role)?;
        usecases::add_family_member(self.repo.as_ref(), migration_id, &args.name, role, args.age)
            .await
    }

    /// T3: progressive-enrichment update to a migration.
    pub async fn update_migration_status(&self, args: UpdateMigrationStatusArgs) -> Value {
        let started = Instant::now();
        let migration_id = MigrationId::new(args.migration_id);
        let outcome = self.update_migration_status_inner(migration_id, &args).await;
        self.record(
            "update_migration_status",
            Some(migration_id),
            json!({
                "photo_count": args.photo_count,
                "video_count": args.video_count,
                "total_icloud_storage_gb": args.total_icloud_storage_gb,
                "current_phase": args.current_phase,
                "overall_progress": args.overall_progress,
            }),
            &outcome,
            started,
        )
        .await;
        match outcome {
            Ok(migration) => ok(json!({
                "migration_id": migration.id().as_i64(),
                "phase": migration.phase().to_string(),
                "overall_progress": migration.overall_progress(),
            })),
            Err(e) => err(&e),
        }
    }

    async fn update_migration_status_inner(
        &self,
        migration_id: MigrationId,
        args: &UpdateMigrationStatusArgs,
    ) -> Result<migration_core::domain::Migration, ToolError> {
        let phase = args
            .current_phase
            .as_deref()
            .map(Phase::from_str)
            .transpose()?;
        let update = MigrationUpdate {
            photo_count: args.photo_count,
            video_count: args.video_count,
            total_icloud_storage_gb: args.total_icloud_storage_gb,
            google_photos_baseline_gb: args.google_photos_baseline_gb,
            google_drive_baseline_gb: args.google_drive_baseline_gb,
            google_mail_baseline_gb: args.google_mail_baseline_gb,
            family_size: args.family_size,
            family_group_name: args.family_group_name.clone(),
            phase,
            overall_progress: args.overall_progress,
            completed_at: None,
        };
        usecases::update_migration_status(self.repo.as_ref(), migration_id, update, Utc::now())
            .await
    }

    /// T4: records family-service adoption progress.
    pub async fn update_family_member_apps(&self, args: UpdateFamilyMemberAppsArgs) -> Value {
        let started = Instant::now();
        let migration_id = MigrationId::new(args.migration_id);
        let outcome = self.update_family_member_apps_inner(migration_id, &args).await;
        self.record(
            "update_family_member_apps",
            Some(migration_id),
            json!({
                "member_name": args.member_name,
                "service": args.service,
                "status": args.status,
            }),
            &outcome,
            started,
        )
        .await;
        match outcome {
            Ok(adoption) => ok(json!({
                "member_name": args.member_name,
                "service": adoption.service().to_string(),
                "status": adoption.status().to_string(),
            })),
            Err(e) => err(&e),
        }
    }

    async fn update_family_member_apps_inner(
        &self,
        migration_id: MigrationId,
        args: &UpdateFamilyMemberAppsArgs,
    ) -> Result<migration_core::domain::FamilyAppAdoption, ToolError> {
        let service = Service::from_str(&args.service)?;
        let status = AdoptionStatus::from_str(&args.status)?;
        let details = args.details.as_ref().map(|d| AdoptionDetails {
            in_group: d.in_group,
            location_share_sent: d.location_share_sent,
            location_share_received: d.location_share_received,
            card_activated: d.card_activated,
            card_last_four: d.card_last_four.clone(),
        });
        usecases::update_family_member_apps(
            self.repo.as_ref(),
            migration_id,
            &args.member_name,
            service,
            status,
            details,
            Utc::now(),
        )
        .await
    }

    /// T5: the uber-status operation. The only tool that calls a
    /// collaborator.
    pub async fn get_migration_status(&self, args: GetMigrationStatusArgs) -> Value {
        let started = Instant::now();
        let migration_id = MigrationId::new(args.migration_id);
        let outcome = usecases::get_migration_status(
            self.repo.as_ref(),
            self.browser.as_ref(),
            migration_id,
            args.day_number,
            Utc::now(),
        )
        .await;
        self.record(
            "get_migration_status",
            Some(migration_id),
            json!({ "day_number": args.day_number }),
            &outcome,
            started,
        )
        .await;
        match outcome {
            Ok(status) => ok(status),
            Err(e) => err(&e),
        }
    }

    /// T6: queries family members with an optional filter.
    pub async fn get_family_members(&self, args: GetFamilyMembersArgs) -> Value {
        let started = Instant::now();
        let migration_id = MigrationId::new(args.migration_id);
        let outcome = self.get_family_members_inner(migration_id, &args).await;
        self.record(
            "get_family_members",
            Some(migration_id),
            json!({ "filter": args.filter }),
            &outcome,
            started,
        )
        .await;
        match outcome {
            Ok(members) => ok(json!({ "members": members })),
            Err(e) => err(&e),
        }
    }

    async fn get_family_members_inner(
        &self,
        migration_id: MigrationId,
        args: &GetFamilyMembersArgs,
    ) -> Result<Vec<migration_core::ports::FamilyMemberView>, ToolError> {
        let filter = FamilyMemberFilter::from_str(&args.filter)?;
        usecases::get_family_members(self.repo.as_ref(), migration_id, filter).await
    }

    /// T7: composes the final report once day 7 has been reached.
    pub async fn generate_migration_report(&self, args: GenerateMigrationReportArgs) -> Value {
        let started = Instant::now();
        let migration_id = MigrationId::new(args.migration_id);
        let outcome = self.generate_migration_report_inner(migration_id, &args).await;
        self.record(
            "generate_migration_report",
            Some(migration_id),
            json!({ "format": args.format }),
            &outcome,
            started,
        )
        .await;
        match outcome {
            Ok(report) => ok(report),
            Err(e) => err(&e),
        }
    }

    async fn generate_migration_report_inner(
        &self,
        migration_id: MigrationId,
        args: &GenerateMigrationReportArgs,
    ) -> Result<usecases::MigrationReport, ToolError> {
        let format = ReportFormat::from_str(&args.format)?;
        usecases::generate_migration_report(self.repo.as_ref(), migration_id, format).await
    }

    /// Writes one E8 audit entry per call, independent of any domain write
    /// the operation performed. Audit failures never affect the tool's own
    /// response — [`AuditLogger`] already swallows its own errors behind a
    /// `tracing::warn!`.
    async fn record<T>(
        &self,
        operation: &str,
        migration_id: Option<MigrationId>,
        arguments: Value,
        outcome: &Result<T, ToolError>,
        started: Instant,
    ) {
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome_kind = match outcome {
            Ok(_) => "success".to_string(),
            Err(e) => e.kind().to_string(),
        };
        self.audit
            .record_call(
                operation,
                migration_id.map(MigrationId::as_i64),
                arguments,
                &outcome_kind,
                duration_ms,
            )
            .await;
    }

    /// Exposes the Device Collaborator so `migration-agent` can wire a
    /// future "run device commands" adapter entry point without reaching
    /// past the tool surface into `migration-collab` directly. Not one of
    /// the seven tools: T4 is the only place the core records device
    /// observations, and it takes them as arguments rather than fetching
    /// them itself.
    #[must_use]
    pub fn device_collaborator(&self) -> Arc<dyn IDeviceCollaborator> {
        Arc::clone(&self.device)
    }
}
