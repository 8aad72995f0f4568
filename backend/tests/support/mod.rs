//! Shared helpers for the backend integration tests.
//!
//! Each file under `tests/` compiles as its own crate, so the helpers live
//! here and are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, provision_database, shared_cluster};
