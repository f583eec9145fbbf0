//! The Tool Call Audit Entry (E8).
//!
//! Distinct from the domain's E5/E6 observability rows: E8 is an
//! operational record of *that a tool was called*, not of migration
//! progress. It is never read by the progress-synthesis algorithm and
//! never appears in a T7 report.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// One row per tool-surface invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallAuditEntry {
    pub id: Option<i64>,
    pub occurred_at: DateTime<Utc>,
    pub operation: String,
    pub migration_id: Option<i64>,
    pub arguments: Value,
    /// `"success"` or one of `ToolError::kind()`'s six error strings.
    pub outcome: String,
    pub duration_ms: u64,
}

impl ToolCallAuditEntry {
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        migration_id: Option<i64>,
        arguments: Value,
        outcome: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: None,
            occurred_at: Utc::now(),
            operation: operation.into(),
            migration_id,
            arguments,
            outcome: outcome.into(),
            duration_ms,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_no_id_until_persisted() {
        let entry = ToolCallAuditEntry::new(
            "initialize_migration",
            None,
            serde_json::json!({"user_name": "Carol"}),
            "success",
            12,
        );
        assert!(entry.id.is_none());
        assert!(entry.is_success());
    }

    #[test]
    fn non_success_outcome_is_not_success() {
        let entry = ToolCallAuditEntry::new(
            "get_migration_status",
            Some(1),
            serde_json::json!({"day_number": 9}),
            "invalid_argument",
            3,
        );
        assert!(!entry.is_success());
    }
}
