//! Integration test: `AuditLogger` against the shared migration-store
//! schema (the `tool_call_audit` table migrated by
//! `migration-store::DatabasePool`, per this crate's design note in
//! `store.rs`: both crates share one SQLite file).

use migration_audit::{AuditLogger, AuditStore};
use migration_store::DatabasePool;

#[tokio::test]
async fn audit_entries_persist_against_the_real_migrated_schema() {
    let pool = DatabasePool::in_memory()
        .await
        .expect("failed to create in-memory database");
    let logger = AuditLogger::new(AuditStore::new(pool.pool().clone()));

    logger
        .record_call(
            "initialize_migration",
            None,
            serde_json::json!({"user_name": "Carol", "years_on_source": 10}),
            "success",
            8,
        )
        .await;
    logger
        .record_call(
            "get_migration_status",
            Some(1),
            serde_json::json!({"day_number": 4}),
            "success",
            42,
        )
        .await;
    logger
        .record_call(
            "get_migration_status",
            Some(1),
            serde_json::json!({"day_number": 9}),
            "invalid_argument",
            0,
        )
        .await;

    let recent = logger.recent(10).await;
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].operation, "get_migration_status");
    assert_eq!(recent[0].outcome, "invalid_argument");
    assert_eq!(recent[2].operation, "initialize_migration");
    assert!(recent[2].is_success());
}
