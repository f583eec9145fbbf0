//! Migration Assistant Audit - the Tool Call Audit Entry (E8)
//!
//! An operational, append-only log of every tool-surface invocation
//! (operation, migration id, arguments, outcome, duration), independent of
//! the domain's E5/E6 observability rows. No presentation dashboard reads
//! this log; it exists purely as structured operational history alongside
//! (not instead of) the domain tables.

pub mod entry;
pub mod logger;
pub mod store;

pub use entry::ToolCallAuditEntry;
pub use logger::AuditLogger;
pub use store::AuditStore;
