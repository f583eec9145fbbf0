//! Migration Assistant Tools - the tool surface (C3)
//!
//! Seven named operations exposed to an external agent runtime: validation,
//! dispatch to `migration-core` use cases, and JSON-serializable responses
//! that never let a panic or bare `Err` cross the boundary.
//!
//! - [`service::MigrationTools`] is the transport-independent half: one
//!   async method per tool, callable directly from tests or any transport.
//! - [`server`] wires `MigrationTools` into an `rmcp` tool router so
//!   `migration-agent` can serve it over MCP stdio.

pub mod args;
pub mod responses;
pub mod server;
pub mod service;

pub use service::MigrationTools;
