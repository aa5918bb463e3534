//! Core domain logic for the taxpayer records application.
//! This crate owns record invariants, the SQLite-backed store and the client
//! view model that drives the records screen.

pub mod client;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use client::{
    render_table, BusyIndicator, StoreError, StoreResult, SubmitOutcome, TableState,
    TaxPayerApp, TaxPayerForm, TaxPayerStore,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::taxpayer::{TaxPayer, TaxPayerField, TaxPayerValidationError, Tid};
pub use repo::taxpayer_repo::{RepoError, RepoResult, SqliteTaxPayerRepository, TaxPayerRepository};
pub use service::taxpayer_service::TaxPayerService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
