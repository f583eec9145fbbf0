//! Status command — a CLI-only view onto T5 (`get_migration_status`),
//! useful for checking progress without a running MCP client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use migration_audit::{AuditLogger, AuditStore};
use migration_collab::FixtureBrowserCollaborator;
use migration_core::config::Config;
use migration_core::ports::{IBrowserCollaborator, IDeviceCollaborator};
use migration_store::{DatabasePool, SqliteStateRepository};
use migration_tools::args::GetMigrationStatusArgs;
use migration_tools::MigrationTools;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct StatusCommand {
    /// The migration to report on.
    pub migration_id: i64,
    /// Which day of the seven-day run to report (1-7).
    pub day_number: i32,
    /// Override the configured SQLite database path.
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

struct NullDevice;

#[async_trait::async_trait]
impl IDeviceCollaborator for NullDevice {
    async fn run_commands(
        &self,
        _commands: &[String],
    ) -> anyhow::Result<migration_core::ports::device_collaborator::DeviceObservation> {
        Ok(migration_core::ports::device_collaborator::DeviceObservation::default())
    }
}

impl StatusCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(matches!(format, OutputFormat::Json));
        let config = Config::load_or_default(&Config::default_path());
        let db_path = self.db_path.clone().unwrap_or(config.store.db_path);

        if !db_path.exists() {
            formatter.error(
                "No database found. Start 'migration-agent serve' and call initialize_migration first.",
            );
            return Ok(());
        }

        let pool = DatabasePool::new(&db_path)
            .await
            .context("failed to open the migration assistant database")?;
        let repo = Arc::new(SqliteStateRepository::new(pool.pool().clone()));
        let browser: Arc<dyn IBrowserCollaborator> = Arc::new(FixtureBrowserCollaborator::default());
        let device: Arc<dyn IDeviceCollaborator> = Arc::new(NullDevice);
        let audit = Arc::new(AuditLogger::new(AuditStore::new(pool.pool().clone())));
        let tools = MigrationTools::new(repo, browser, device, audit);

        let status = tools
            .get_migration_status(GetMigrationStatusArgs {
                migration_id: self.migration_id,
                day_number: self.day_number,
            })
            .await;

        if matches!(format, OutputFormat::Json) {
            formatter.print_json(&status);
            return Ok(());
        }

        if status["success"].as_bool().unwrap_or(false) {
            formatter.success(&format!(
                "Migration {} — day {}",
                self.migration_id, self.day_number
            ));
            formatter.info("");
            if let Some(percent) = status["photo_progress"]["percent_complete"].as_f64() {
                formatter.info(&format!("Photo transfer: {percent:.1}% complete"));
            }
            if let Some(milestone) = status["day_summary"]["expected_milestone"].as_str() {
                formatter.info(&format!("Expected milestone: {milestone}"));
            }
        } else {
            formatter.error(status["message"].as_str().unwrap_or("unknown error"));
        }

        Ok(())
    }
}
