//! Store contract as seen by the client.
//!
//! The client treats the store as opaque: it only knows four operations and
//! a single failure kind.

use crate::model::taxpayer::TaxPayer;
use crate::repo::taxpayer_repo::{RepoError, TaxPayerRepository};
use crate::service::taxpayer_service::TaxPayerService;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// A store operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "store operation failed: {}", self.message)
    }
}

impl Error for StoreError {}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::new(value.to_string())
    }
}

/// Remote data store backing the client.
pub trait TaxPayerStore {
    /// Returns all records; order is unspecified.
    fn list(&self) -> StoreResult<Vec<TaxPayer>>;
    /// Creates a record; fails when `tid` already exists.
    fn create(&self, tid: &str, first_name: &str, last_name: &str, address: &str)
        -> StoreResult<()>;
    /// Returns the record with this TID, or `None`.
    fn search_by_id(&self, tid: &str) -> StoreResult<Option<TaxPayer>>;
    /// Updates mutable fields; `Ok(false)` when `tid` does not exist.
    fn update(&self, tid: &str, first_name: &str, last_name: &str, address: &str)
        -> StoreResult<bool>;
}

impl<R: TaxPayerRepository> TaxPayerStore for TaxPayerService<R> {
    fn list(&self) -> StoreResult<Vec<TaxPayer>> {
        Ok(self.list_taxpayers()?)
    }

    fn create(
        &self,
        tid: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
    ) -> StoreResult<()> {
        self.create_taxpayer(tid, first_name, last_name, address)?;
        Ok(())
    }

    fn search_by_id(&self, tid: &str) -> StoreResult<Option<TaxPayer>> {
        Ok(self.search_taxpayer(tid)?)
    }

    fn update(
        &self,
        tid: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
    ) -> StoreResult<bool> {
        Ok(self.update_taxpayer(tid, first_name, last_name, address)?)
    }
}
