//! TaxPayer store service.
//!
//! # Responsibility
//! - Expose the store contract: list, create, search by TID, update.
//! - Delegate persistence to repository implementations.
//! - Emit metadata-only diagnostics for every operation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Update on a missing TID reports `false` and leaves storage untouched.
//! - Record contents are never written to logs.

use crate::model::taxpayer::{TaxPayer, Tid};
use crate::repo::taxpayer_repo::{RepoError, RepoResult, TaxPayerRepository};
use log::{debug, info, warn};
use std::time::Instant;

/// Store facade over a taxpayer repository.
pub struct TaxPayerService<R: TaxPayerRepository> {
    repo: R,
}

impl<R: TaxPayerRepository> TaxPayerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every stored record.
    pub fn list_taxpayers(&self) -> RepoResult<Vec<TaxPayer>> {
        let started_at = Instant::now();
        let result = self.repo.list_taxpayers();
        match &result {
            Ok(items) => debug!(
                "event=taxpayer_list module=service status=ok count={} duration_ms={}",
                items.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("taxpayer_list", started_at, err),
        }
        result
    }

    /// Creates a record from its four fields.
    ///
    /// # Errors
    /// - `RepoError::Validation` when a field is empty.
    /// - `RepoError::DuplicateTid` when `tid` is already taken.
    pub fn create_taxpayer(
        &self,
        tid: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> RepoResult<Tid> {
        let started_at = Instant::now();
        let taxpayer = TaxPayer::new(tid, first_name, last_name, address);
        let result = self.repo.create_taxpayer(&taxpayer);
        match &result {
            Ok(_) => info!(
                "event=taxpayer_create module=service status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("taxpayer_create", started_at, err),
        }
        result
    }

    /// Looks one record up by TID; `None` when absent.
    pub fn search_taxpayer(&self, tid: &str) -> RepoResult<Option<TaxPayer>> {
        let started_at = Instant::now();
        let result = self.repo.get_taxpayer(tid);
        match &result {
            Ok(found) => debug!(
                "event=taxpayer_search module=service status=ok found={} duration_ms={}",
                found.is_some(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("taxpayer_search", started_at, err),
        }
        result
    }

    /// Replaces first name, last name and address of an existing record.
    ///
    /// Returns `Ok(false)` when no record has this TID.
    pub fn update_taxpayer(
        &self,
        tid: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> RepoResult<bool> {
        let started_at = Instant::now();
        let taxpayer = TaxPayer::new(tid, first_name, last_name, address);
        match self.repo.update_taxpayer(&taxpayer) {
            Ok(()) => {
                info!(
                    "event=taxpayer_update module=service status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(true)
            }
            Err(RepoError::NotFound(_)) => {
                info!(
                    "event=taxpayer_update module=service status=not_found duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(false)
            }
            Err(err) => {
                log_failure("taxpayer_update", started_at, &err);
                Err(err)
            }
        }
    }

    /// Number of stored records.
    pub fn count_taxpayers(&self) -> RepoResult<u64> {
        self.repo.count_taxpayers()
    }
}

fn log_failure(event: &str, started_at: Instant, err: &RepoError) {
    warn!(
        "event={event} module=service status=error error_code={} duration_ms={}",
        error_code(err),
        started_at.elapsed().as_millis()
    );
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::Db(_) => "db_error",
        RepoError::NotFound(_) => "not_found",
        RepoError::DuplicateTid(_) => "duplicate_tid",
        RepoError::InvalidData(_) => "invalid_data",
    }
}
