//! Record form state shared by the creation form and the edit dialog.
//!
//! # Invariants
//! - A form opened for editing keeps its TID read-only.
//! - `validate` reports every empty field, not only the first one.

use crate::model::taxpayer::{is_blank, TaxPayer, TaxPayerField, TaxPayerValidationError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-field messages, ordered by field display order.
pub type FieldErrors = BTreeMap<TaxPayerField, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// The field cannot be edited in this form.
    ReadOnlyField(TaxPayerField),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnlyField(field) => write!(f, "{} is read-only", field.label()),
        }
    }
}

impl Error for FormError {}

/// Editable draft of one taxpayer record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxPayerForm {
    draft: TaxPayer,
    tid_locked: bool,
    errors: FieldErrors,
}

impl TaxPayerForm {
    /// Empty form with every field editable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from `record`, with the TID locked.
    pub fn for_edit(record: &TaxPayer) -> Self {
        Self {
            draft: record.clone(),
            tid_locked: true,
            errors: FieldErrors::new(),
        }
    }

    pub fn value(&self, field: TaxPayerField) -> &str {
        self.draft.field(field)
    }

    pub fn is_read_only(&self, field: TaxPayerField) -> bool {
        self.tid_locked && !field.is_mutable()
    }

    /// Sets one field and clears its pending error message.
    pub fn set(
        &mut self,
        field: TaxPayerField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        if self.is_read_only(field) {
            return Err(FormError::ReadOnlyField(field));
        }
        *self.field_mut(field) = value.into();
        self.errors.remove(&field);
        Ok(())
    }

    /// Message shown under `field`, if the last validation failed on it.
    pub fn error(&self, field: TaxPayerField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Checks required fields and returns the record to submit.
    ///
    /// On failure the messages are also kept on the form for display.
    pub fn validate(&mut self) -> Result<TaxPayer, FieldErrors> {
        self.errors = TaxPayerField::ALL
            .into_iter()
            .filter(|field| is_blank(self.draft.field(*field)))
            .map(|field| {
                (
                    field,
                    TaxPayerValidationError::EmptyField(field).to_string(),
                )
            })
            .collect();

        if self.errors.is_empty() {
            Ok(self.draft.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Clears values and messages; an edit form keeps its locked TID.
    pub fn reset(&mut self) {
        let tid = if self.tid_locked {
            std::mem::take(&mut self.draft.tid)
        } else {
            String::new()
        };
        self.draft = TaxPayer {
            tid,
            ..TaxPayer::default()
        };
        self.errors.clear();
    }

    fn field_mut(&mut self, field: TaxPayerField) -> &mut String {
        match field {
            TaxPayerField::Tid => &mut self.draft.tid,
            TaxPayerField::FirstName => &mut self.draft.first_name,
            TaxPayerField::LastName => &mut self.draft.last_name,
            TaxPayerField::Address => &mut self.draft.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FormError, TaxPayerForm};
    use crate::model::taxpayer::{TaxPayer, TaxPayerField};

    fn filled_form() -> TaxPayerForm {
        let mut form = TaxPayerForm::new();
        form.set(TaxPayerField::Tid, "T-100").unwrap();
        form.set(TaxPayerField::FirstName, "Grace").unwrap();
        form.set(TaxPayerField::LastName, "Hopper").unwrap();
        form.set(TaxPayerField::Address, "1 Navy Way").unwrap();
        form
    }

    #[test]
    fn validate_collects_every_missing_field() {
        let mut form = TaxPayerForm::new();
        form.set(TaxPayerField::FirstName, "Grace").unwrap();
        form.set(TaxPayerField::Address, "   ").unwrap();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            form.error(TaxPayerField::Tid),
            Some("TID is required")
        );
        assert_eq!(
            form.error(TaxPayerField::LastName),
            Some("Last Name is required")
        );
        assert_eq!(
            form.error(TaxPayerField::Address),
            Some("Address is required")
        );
        assert_eq!(form.error(TaxPayerField::FirstName), None);
    }

    #[test]
    fn setting_a_field_clears_its_error() {
        let mut form = TaxPayerForm::new();
        form.validate().unwrap_err();
        form.set(TaxPayerField::Tid, "T-1").unwrap();
        assert_eq!(form.error(TaxPayerField::Tid), None);
        assert!(form.error(TaxPayerField::Address).is_some());
    }

    #[test]
    fn validate_returns_draft_when_complete() {
        let mut form = filled_form();
        let record = form.validate().unwrap();
        assert_eq!(record, TaxPayer::new("T-100", "Grace", "Hopper", "1 Navy Way"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn edit_form_locks_tid_but_accepts_other_fields() {
        let record = TaxPayer::new("T-7", "Alan", "Turing", "Bletchley");
        let mut form = TaxPayerForm::for_edit(&record);

        assert_eq!(
            form.set(TaxPayerField::Tid, "T-8"),
            Err(FormError::ReadOnlyField(TaxPayerField::Tid))
        );
        form.set(TaxPayerField::Address, "Manchester").unwrap();
        assert_eq!(form.value(TaxPayerField::Tid), "T-7");
        assert_eq!(form.value(TaxPayerField::Address), "Manchester");
    }

    #[test]
    fn reset_clears_values_and_keeps_locked_tid() {
        let mut create = filled_form();
        create.reset();
        assert_eq!(create, TaxPayerForm::new());

        let mut edit = TaxPayerForm::for_edit(&TaxPayer::new("T-7", "A", "B", "C"));
        edit.reset();
        assert_eq!(edit.value(TaxPayerField::Tid), "T-7");
        assert_eq!(edit.value(TaxPayerField::FirstName), "");
    }
}
