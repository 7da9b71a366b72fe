//! Shared helpers for backend integration tests.
//!
//! Each file under `backend/tests/` compiles as its own crate, so helpers
//! live here and are pulled in with `mod support;`.

pub mod cluster;
pub mod embedded_postgres;

pub use cluster::{handle_cluster_setup_failure, shared_cluster};
pub use embedded_postgres::provision_template_database;
