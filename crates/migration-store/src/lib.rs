//! Migration Assistant Store - SQLite-backed state persistence (C1)
//!
//! This crate provides the concrete, persistent implementation of
//! `migration_core::ports::IStateRepository`:
//! - A connection pool wrapper ([`pool::DatabasePool`]) with WAL mode and
//!   automatic, idempotent schema migration.
//! - [`repository::SqliteStateRepository`], covering every E1-E6 operation.

pub mod pool;
pub mod repository;

pub use pool::DatabasePool;
pub use repository::SqliteStateRepository;
