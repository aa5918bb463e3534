//! TaxPayer domain model.
//!
//! # Responsibility
//! - Define the canonical taxpayer record shared by store and client.
//! - Provide required-field validation used by write paths and forms.
//!
//! # Invariants
//! - `tid` uniquely identifies a record and never changes after creation.
//! - Every field is non-empty (whitespace-only counts as empty).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Taxpayer identifier, the unique record key.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type Tid = String;

/// One editable (or key) field of a taxpayer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaxPayerField {
    Tid,
    FirstName,
    LastName,
    Address,
}

impl TaxPayerField {
    /// All fields in display order.
    pub const ALL: [TaxPayerField; 4] = [
        Self::Tid,
        Self::FirstName,
        Self::LastName,
        Self::Address,
    ];

    /// User-facing label, shared by form messages and table headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tid => "TID",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Address => "Address",
        }
    }

    /// Whether the field may change after the record is created.
    pub fn is_mutable(self) -> bool {
        !matches!(self, Self::Tid)
    }
}

impl Display for TaxPayerField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failure for a taxpayer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxPayerValidationError {
    /// A required field is empty or whitespace-only.
    EmptyField(TaxPayerField),
}

impl Display for TaxPayerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} is required", field.label()),
        }
    }
}

impl Error for TaxPayerValidationError {}

/// Canonical taxpayer record.
///
/// Serialized with camelCase names to match the store's wire shape.
/// Deserialization rejects records with blank fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaxPayerWire")]
pub struct TaxPayer {
    /// Unique key, immutable after creation.
    pub tid: Tid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl TaxPayer {
    /// Creates a record from its four fields without validating them.
    pub fn new(
        tid: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            tid: tid.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
        }
    }

    /// Returns the value stored for `field`.
    pub fn field(&self, field: TaxPayerField) -> &str {
        match field {
            TaxPayerField::Tid => &self.tid,
            TaxPayerField::FirstName => &self.first_name,
            TaxPayerField::LastName => &self.last_name,
            TaxPayerField::Address => &self.address,
        }
    }

    /// Checks that every required field carries a value.
    ///
    /// Reports the first empty field in display order.
    pub fn validate(&self) -> Result<(), TaxPayerValidationError> {
        match TaxPayerField::ALL
            .into_iter()
            .find(|field| is_blank(self.field(*field)))
        {
            Some(field) => Err(TaxPayerValidationError::EmptyField(field)),
            None => Ok(()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaxPayerWire {
    tid: String,
    first_name: String,
    last_name: String,
    address: String,
}

impl TryFrom<TaxPayerWire> for TaxPayer {
    type Error = TaxPayerValidationError;

    fn try_from(value: TaxPayerWire) -> Result<Self, Self::Error> {
        let taxpayer = Self::new(value.tid, value.first_name, value.last_name, value.address);
        taxpayer.validate()?;
        Ok(taxpayer)
    }
}

/// Required-field check shared by the model and client forms.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
