//! Records screen controller.
//!
//! # Responsibility
//! - Drive the create, search and edit flows against a [`TaxPayerStore`].
//! - Own the list shown in the table and refresh it after writes.
//!
//! # Invariants
//! - A failed store call leaves records, forms and dialog untouched.
//! - Empty required fields short-circuit before any store call.
//! - Responses are applied in the order calls return; there is no
//!   cancellation or deduplication.

use crate::client::busy::BusyIndicator;
use crate::client::form::{FieldErrors, TaxPayerForm};
use crate::client::store::{StoreError, TaxPayerStore};
use crate::client::table::{TableState, NO_RECORDS_MESSAGE};
use crate::logging::sanitize_message;
use crate::model::taxpayer::TaxPayer;
use log::{error, info, warn};

const SUBMIT_LABEL_IDLE: &str = "Add TaxPayer";
const SUBMIT_LABEL_BUSY: &str = "Adding...";
const MAX_LOGGED_ERROR_CHARS: usize = 160;

/// Result of submitting the create form or the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store accepted the write and the list was refreshed.
    Submitted,
    /// Required fields are empty; the store was not called.
    Invalid(FieldErrors),
    /// The store reported no record for the TID being edited.
    NotFound,
    /// The store call failed; view state is unchanged.
    Failed,
    /// `submit_edit` was called with no dialog open.
    NoDialog,
}

/// View model for the taxpayer records screen.
pub struct TaxPayerApp<S: TaxPayerStore> {
    store: S,
    busy: BusyIndicator,
    records: Vec<TaxPayer>,
    search_text: String,
    create_form: TaxPayerForm,
    edit_dialog: Option<TaxPayerForm>,
    table: TableState,
}

impl<S: TaxPayerStore> TaxPayerApp<S> {
    /// Creates an app with an empty list; call [`TaxPayerApp::load`] to fetch.
    pub fn new(store: S) -> Self {
        Self::with_busy_indicator(store, BusyIndicator::new())
    }

    /// Creates an app sharing `busy` with other observers.
    pub fn with_busy_indicator(store: S, busy: BusyIndicator) -> Self {
        Self {
            store,
            busy,
            records: Vec::new(),
            search_text: String::new(),
            create_form: TaxPayerForm::new(),
            edit_dialog: None,
            table: TableState::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches every record and replaces the displayed list.
    ///
    /// Returns `false` when the store call failed and the list was kept.
    pub fn load(&mut self) -> bool {
        let result = {
            let _busy = self.busy.begin();
            self.store.list()
        };
        match result {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(err) => {
                log_store_failure("taxpayer_list", &err);
                false
            }
        }
    }

    /// Records currently held by the table, in store order.
    pub fn records(&self) -> &[TaxPayer] {
        &self.records
    }

    /// Rows of the current table page after sorting.
    pub fn visible_rows(&self) -> Vec<&TaxPayer> {
        self.table.visible_rows(&self.records)
    }

    /// Message shown instead of rows when the list is empty.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.records.is_empty().then_some(NO_RECORDS_MESSAGE)
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn busy_indicator(&self) -> &BusyIndicator {
        &self.busy
    }

    /// Label of the create button; reflects in-flight calls.
    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Runs the search for the current search text.
    ///
    /// An empty text lists all records. Any other text, whitespace included,
    /// is sent as typed: the table shows the single match, or nothing (and the
    /// empty-result message) when absent.
    pub fn search(&mut self) -> bool {
        if self.search_text.is_empty() {
            return self.load();
        }

        let result = {
            let _busy = self.busy.begin();
            self.store.search_by_id(&self.search_text)
        };
        match result {
            Ok(found) => {
                self.records = found.into_iter().collect();
                self.table.set_page(1);
                true
            }
            Err(err) => {
                log_store_failure("taxpayer_search", &err);
                false
            }
        }
    }

    pub fn create_form(&self) -> &TaxPayerForm {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut TaxPayerForm {
        &mut self.create_form
    }

    /// Validates and submits the create form.
    ///
    /// On success the form is cleared and the list refreshed.
    pub fn submit_create(&mut self) -> SubmitOutcome {
        let record = match self.create_form.validate() {
            Ok(record) => record,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        let result = {
            let _busy = self.busy.begin();
            self.store.create(
                &record.tid,
                &record.first_name,
                &record.last_name,
                &record.address,
            )
        };
        if let Err(err) = result {
            log_store_failure("taxpayer_create", &err);
            return SubmitOutcome::Failed;
        }

        info!("event=taxpayer_create module=client status=ok");
        self.create_form.reset();
        self.load();
        SubmitOutcome::Submitted
    }

    /// Opens the edit dialog for a record currently shown in the table.
    ///
    /// Returns `false` when no displayed record has this TID.
    pub fn open_edit(&mut self, tid: &str) -> bool {
        match self.records.iter().find(|record| record.tid == tid) {
            Some(record) => {
                self.edit_dialog = Some(TaxPayerForm::for_edit(record));
                true
            }
            None => false,
        }
    }

    pub fn edit_dialog(&self) -> Option<&TaxPayerForm> {
        self.edit_dialog.as_ref()
    }

    pub fn edit_dialog_mut(&mut self) -> Option<&mut TaxPayerForm> {
        self.edit_dialog.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.edit_dialog = None;
    }

    /// Validates and submits the edit dialog.
    ///
    /// Closes the dialog and re-runs the current search (or lists all records
    /// when the search text is empty) only when the store reports the update
    /// succeeded; otherwise the dialog stays open as it was.
    pub fn submit_edit(&mut self) -> SubmitOutcome {
        let Some(dialog) = self.edit_dialog.as_mut() else {
            return SubmitOutcome::NoDialog;
        };
        let record = match dialog.validate() {
            Ok(record) => record,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        let result = {
            let _busy = self.busy.begin();
            self.store.update(
                &record.tid,
                &record.first_name,
                &record.last_name,
                &record.address,
            )
        };
        match result {
            Ok(true) => {
                info!("event=taxpayer_update module=client status=ok");
                self.edit_dialog = None;
                self.search();
                SubmitOutcome::Submitted
            }
            Ok(false) => {
                warn!("event=taxpayer_update module=client status=not_found");
                SubmitOutcome::NotFound
            }
            Err(err) => {
                log_store_failure("taxpayer_update", &err);
                SubmitOutcome::Failed
            }
        }
    }
}

fn log_store_failure(event: &str, err: &StoreError) {
    error!(
        "event={event} module=client status=error error={}",
        sanitize_message(err.message(), MAX_LOGGED_ERROR_CHARS)
    );
}
