//! Report command — a CLI-only view onto T7 (`generate_migration_report`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use migration_audit::{AuditLogger, AuditStore};
use migration_collab::{FixtureBrowserCollaborator, FixtureDeviceCollaborator};
use migration_core::config::Config;
use migration_core::ports::{IBrowserCollaborator, IDeviceCollaborator};
use migration_store::{DatabasePool, SqliteStateRepository};
use migration_tools::args::GenerateMigrationReportArgs;
use migration_tools::MigrationTools;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct ReportCommand {
    /// The migration to report on.
    pub migration_id: i64,
    /// `summary` or `detailed`.
    #[arg(long, default_value = "summary")]
    pub format_choice: String,
    /// Override the configured SQLite database path.
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

impl ReportCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = Config::load_or_default(&Config::default_path());
        let db_path = self.db_path.clone().unwrap_or(config.store.db_path);

        if !db_path.exists() {
            formatter.error("No database found for this migration.");
            return Ok(());
        }

        let pool = DatabasePool::new(&db_path)
            .await
            .context("failed to open the migration assistant database")?;
        let repo = Arc::new(SqliteStateRepository::new(pool.pool().clone()));
        let browser: Arc<dyn IBrowserCollaborator> = Arc::new(FixtureBrowserCollaborator::default());
        let device: Arc<dyn IDeviceCollaborator> =
            Arc::new(FixtureDeviceCollaborator::default());
        let audit = Arc::new(AuditLogger::new(AuditStore::new(pool.pool().clone())));
        let tools = MigrationTools::new(repo, browser, device, audit);

        let report = tools
            .generate_migration_report(GenerateMigrationReportArgs {
                migration_id: self.migration_id,
                format: self.format_choice.clone(),
            })
            .await;

        if matches!(format, OutputFormat::Json) {
            formatter.print_json(&report);
            return Ok(());
        }

        if report["success"].as_bool().unwrap_or(false) {
            formatter.success(&format!("Migration {} report", self.migration_id));
            formatter.info("");
            formatter.info(&format!(
                "Phase: {}",
                report["migration"]["phase"].as_str().unwrap_or("unknown")
            ));
            if let Some(snapshot) = report.get("final_snapshot") {
                if let Some(percent) = snapshot["percent_complete"].as_f64() {
                    formatter.info(&format!("Final photo progress: {percent:.1}%"));
                }
            }
        } else {
            formatter.error(report["message"].as_str().unwrap_or("unknown error"));
        }

        Ok(())
    }
}
