//! Serve command — starts the MCP stdio server.
//!
//! This is the binary's primary mode: wire `migration-store` (C1),
//! `migration-collab` (C4/C5), and `migration-audit` (E8) into one
//! [`migration_tools::MigrationTools`], wrap it in the `rmcp` tool router,
//! and serve it over stdio until the client disconnects.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use migration_audit::{AuditLogger, AuditStore};
use migration_collab::{CollabFixture, FixtureBrowserCollaborator, FixtureDeviceCollaborator};
use migration_core::config::Config;
use migration_core::ports::{IBrowserCollaborator, IDeviceCollaborator, IStateRepository};
use migration_store::{DatabasePool, SqliteStateRepository};
use migration_tools::server::MigrationToolsServer;
use migration_tools::MigrationTools;
use rmcp::{transport::io::stdio, ServiceExt};
use tracing::info;

use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Override the configured SQLite database path.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Load a fixture file for the bundled demo Browser/Device collaborator.
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

impl ServeCommand {
    pub async fn execute(&self, _format: OutputFormat) -> Result<()> {
        let config = Config::load_or_default(&Config::default_path());
        let db_path = self.db_path.clone().unwrap_or(config.store.db_path);

        let pool = DatabasePool::new(&db_path)
            .await
            .context("failed to open the migration assistant database")?;
        let repo: Arc<dyn IStateRepository> =
            Arc::new(SqliteStateRepository::new(pool.pool().clone()));

        let fixture = match &self.fixture {
            Some(path) => CollabFixture::load_or_default(path)
                .context("failed to load collaborator fixture")?,
            None => CollabFixture::default(),
        };
        let browser: Arc<dyn IBrowserCollaborator> =
            Arc::new(FixtureBrowserCollaborator::new(fixture.clone()));
        let device: Arc<dyn IDeviceCollaborator> =
            Arc::new(FixtureDeviceCollaborator::new(&fixture));

        let audit = Arc::new(AuditLogger::new(AuditStore::new(pool.pool().clone())));

        let tools = MigrationTools::new(repo, browser, device, audit);
        let server = MigrationToolsServer::new(tools);

        info!(db_path = %db_path.display(), "starting migration assistant MCP server");
        let service = server
            .serve(stdio())
            .await
            .context("failed to start MCP stdio transport")?;
        service.waiting().await.context("MCP server task failed")?;
        Ok(())
    }
}
