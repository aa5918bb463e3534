//! Client-side view model for the taxpayer records screen.
//!
//! # Responsibility
//! - Hold view state: creation form, record table, search text, edit dialog.
//! - Orchestrate store calls and refresh view state after writes.
//!
//! # Invariants
//! - Required-field violations never reach the store.
//! - Store failures are logged and leave view state unchanged.
//! - The busy indicator is raised for exactly the duration of each store call.

pub mod app;
pub mod busy;
pub mod form;
pub mod store;
pub mod table;

pub use app::{SubmitOutcome, TaxPayerApp};
pub use busy::{BusyGuard, BusyIndicator};
pub use form::{FieldErrors, FormError, TaxPayerForm};
pub use store::{StoreError, StoreResult, TaxPayerStore};
pub use table::{
    render_table, SortDirection, TableError, TableState, DEFAULT_ROWS_PER_PAGE,
    NO_RECORDS_MESSAGE, ROWS_PER_PAGE_OPTIONS,
};
