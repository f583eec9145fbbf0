//! `AuditLogger` - high-level audit logging service
//!
//! Wraps [`AuditStore::record`] with a single convenience method used by
//! `migration-tools` after every tool-surface call. All methods are
//! non-fatal: errors in audit persistence are logged via `tracing::warn!`
//! but never propagated — an audit failure must never break the tool call
//! that triggered it.

use serde_json::Value;

use crate::entry::ToolCallAuditEntry;
use crate::store::AuditStore;

pub struct AuditLogger {
    store: AuditStore,
}

impl AuditLogger {
    #[must_use]
    pub fn new(store: AuditStore) -> Self {
        Self { store }
    }

    /// Records one E8 entry for a single tool-surface invocation.
    pub async fn record_call(
        &self,
        operation: &str,
        migration_id: Option<i64>,
        arguments: Value,
        outcome: &str,
        duration_ms: u64,
    ) {
        let entry = ToolCallAuditEntry::new(operation, migration_id, arguments, outcome, duration_ms);
        if let Err(e) = self.store.record(&entry).await {
            tracing::warn!(error = %e, operation, "failed to persist tool call audit entry");
        }
    }

    /// The most recent `limit` audit entries, newest first.
    pub async fn recent(&self, limit: i64) -> Vec<ToolCallAuditEntry> {
        match self.store.list_recent(limit).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read tool call audit entries");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn migrated_pool() -> sqlx::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE tool_call_audit (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                occurred_at TEXT NOT NULL,
                operation TEXT NOT NULL,
                migration_id INTEGER,
                arguments TEXT NOT NULL,
                outcome TEXT NOT NULL,
                duration_ms INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[tokio::test]
    async fn record_call_persists_and_is_readable_back() {
        let pool = migrated_pool().await;
        let logger = AuditLogger::new(AuditStore::new(pool));
        logger
            .record_call(
                "initialize_migration",
                None,
                serde_json::json!({"user_name": "Carol"}),
                "success",
                5,
            )
            .await;
        logger
            .record_call(
                "get_migration_status",
                Some(1),
                serde_json::json!({"day_number": 9}),
                "invalid_argument",
                1,
            )
            .await;

        let recent = logger.recent(10).await;
        assert_eq!(recent.len(), 2);
        // newest first
        assert_eq!(recent[0].operation, "get_migration_status");
        assert_eq!(recent[0].outcome, "invalid_argument");
        assert_eq!(recent[1].operation, "initialize_migration");
        assert!(recent[1].is_success());
    }
}
