//! Record table state: column sorting and client-side pagination.
//!
//! # Invariants
//! - Sorting never reorders the records held by the app; it only shapes the
//!   visible page.
//! - The effective page is always within `1..=page_count`.

use crate::model::taxpayer::{TaxPayer, TaxPayerField};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown in place of rows when there is nothing to display.
pub const NO_RECORDS_MESSAGE: &str = "There are no records to display";
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;
pub const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [10, 15, 20, 25, 30];

const COLUMN_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    UnsupportedRowsPerPage(usize),
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedRowsPerPage(value) => write!(
                f,
                "unsupported rows per page `{value}`; expected one of {ROWS_PER_PAGE_OPTIONS:?}"
            ),
        }
    }
}

impl Error for TableError {}

/// Sort and pagination settings for the record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<(TaxPayerField, SortDirection)>,
    page: usize,
    rows_per_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column headers in display order; every column is sortable.
    pub fn columns() -> [TaxPayerField; 4] {
        TaxPayerField::ALL
    }

    pub fn sort(&self) -> Option<(TaxPayerField, SortDirection)> {
        self.sort
    }

    /// Sorts by `column`: ascending on first click, toggling on repeat.
    ///
    /// Returns to the first page.
    pub fn sort_by(&mut self, column: TaxPayerField) {
        let direction = match self.sort {
            Some((current, direction)) if current == column => direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some((column, direction));
        self.page = 1;
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Requested page, 1-based. See [`TableState::effective_page`] for the
    /// page actually shown.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Changes page size and returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), TableError> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(TableError::UnsupportedRowsPerPage(rows_per_page));
        }
        self.rows_per_page = rows_per_page;
        self.page = 1;
        Ok(())
    }

    /// Number of pages for `total` rows; at least one.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page).max(1)
    }

    /// Requested page clamped to the pages available for `total` rows.
    pub fn effective_page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total))
    }

    /// Rows of the current page, sorted by the active column.
    pub fn visible_rows<'a>(&self, records: &'a [TaxPayer]) -> Vec<&'a TaxPayer> {
        let mut rows = records.iter().collect::<Vec<_>>();
        if let Some((column, direction)) = self.sort {
            // Stable sort keeps store order among equal values.
            rows.sort_by(|left, right| {
                direction.apply(left.field(column).cmp(right.field(column)))
            });
        }

        let start = (self.effective_page(records.len()) - 1) * self.rows_per_page;
        rows.into_iter()
            .skip(start)
            .take(self.rows_per_page)
            .collect()
    }
}

/// Renders rows as a fixed-width text table with a header line.
///
/// An empty slice renders the header followed by [`NO_RECORDS_MESSAGE`].
pub fn render_table(rows: &[&TaxPayer]) -> String {
    let columns = TableState::columns();
    let widths = columns.map(|column| {
        rows.iter()
            .map(|row| row.field(column).chars().count())
            .fold(column.label().chars().count(), usize::max)
    });

    let header = render_line(&columns.map(TaxPayerField::label), &widths);
    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = vec![header, separator];
    if rows.is_empty() {
        lines.push(NO_RECORDS_MESSAGE.to_string());
    }
    lines.extend(
        rows.iter()
            .map(|row| render_line(&columns.map(|column| row.field(column)), &widths)),
    );
    lines.join("\n")
}

fn render_line(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
        .trim_end()
        .to_string()
}
