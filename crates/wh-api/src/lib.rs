//! Warehouse assistant API, the library crate behind the REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `wh-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, and `CompletionEngine`.

pub mod config;
pub mod db;
pub mod error;
pub mod inference;
pub mod routes;
pub mod state;
