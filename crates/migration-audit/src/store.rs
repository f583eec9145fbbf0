//! Persistence for the Tool Call Audit Entry (E8).
//!
//! Shares the same SQLite file and connection pool as
//! `migration-store::SqliteStateRepository` (the `tool_call_audit` table is
//! declared alongside E1-E6 in that crate's migration file purely for
//! schema-file discoverability). `AuditStore` does not run its own
//! migration — the caller is expected to construct it from a pool that has
//! already been migrated, the way `migration-agent`'s startup wires one
//! `DatabasePool` and hands its `SqlitePool` to both `migration-store` and
//! `migration-audit`.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::entry::ToolCallAuditEntry;

#[derive(Clone)]
pub struct AuditStore {
    pool: SqlitePool,
}

impl AuditStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Appends one E8 row. Append-only: audit entries are never updated or
    /// deleted by the core.
    pub async fn record(&self, entry: &ToolCallAuditEntry) -> Result<(), sqlx::Error> {
        let arguments = entry.arguments.to_string();
        sqlx::query(
            "INSERT INTO tool_call_audit \
             (occurred_at, operation, migration_id, arguments, outcome, duration_ms) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.occurred_at.to_rfc3339())
        .bind(&entry.operation)
        .bind(entry.migration_id)
        .bind(arguments)
        .bind(&entry.outcome)
        .bind(i64::try_from(entry.duration_ms).unwrap_or(i64::MAX))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Most recent `limit` entries, newest first. Used by operator-facing
    /// tooling only; never consulted by the progress-synthesis algorithm.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<ToolCallAuditEntry>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, occurred_at, operation, migration_id, arguments, outcome, duration_ms \
             FROM tool_call_audit ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let occurred_at: String = row.try_get("occurred_at")?;
                let arguments: String = row.try_get("arguments")?;
                let duration_ms: i64 = row.try_get("duration_ms")?;
                Ok(ToolCallAuditEntry {
                    id: row.try_get("id")?,
                    occurred_at: DateTime::parse_from_rfc3339(&occurred_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                    operation: row.try_get("operation")?,
                    migration_id: row.try_get("migration_id")?,
                    arguments: serde_json::from_str(&arguments).unwrap_or(Value::Null),
                    outcome: row.try_get("outcome")?,
                    duration_ms: u64::try_from(duration_ms).unwrap_or(0),
                })
            })
            .collect()
    }
}
