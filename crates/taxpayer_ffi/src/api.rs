//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the four store operations to Dart via FRB.
//! - Keep error semantics simple: every call returns an envelope with a
//!   human-readable message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call opens its own connection to the resolved database path.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use taxpayer_core::db::open_db;
use taxpayer_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    RepoResult, SqliteTaxPayerRepository, TaxPayer, TaxPayerService,
};

const DB_FILE_NAME: &str = "taxpayer_records.sqlite3";
const DB_PATH_ENV: &str = "TAXPAYER_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One taxpayer row as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPayerItem {
    pub tid: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl From<TaxPayer> for TaxPayerItem {
    fn from(value: TaxPayer) -> Self {
        Self {
            tid: value.tid,
            first_name: value.first_name,
            last_name: value.last_name,
            address: value.address,
        }
    }
}

/// Response envelope for the list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPayerListResponse {
    pub ok: bool,
    /// All records (empty on failure).
    pub items: Vec<TaxPayerItem>,
    pub message: String,
}

/// Response envelope for search-by-TID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPayerSearchResponse {
    pub ok: bool,
    /// Matching record, `None` when absent or on failure.
    pub item: Option<TaxPayerItem>,
    pub message: String,
}

/// Response envelope for create/update calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxPayerActionResponse {
    /// Whether the write was applied.
    pub ok: bool,
    /// Set by update when no record has the requested TID.
    pub not_found: bool,
    pub message: String,
}

impl TaxPayerActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            not_found: false,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            not_found: false,
            message: message.into(),
        }
    }
}

/// Lists every stored record.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn taxpayer_list() -> TaxPayerListResponse {
    match with_service(|service| service.list_taxpayers()) {
        Ok(records) => {
            let items = records
                .into_iter()
                .map(TaxPayerItem::from)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No records.".to_string()
            } else {
                format!("Loaded {} record(s).", items.len())
            };
            TaxPayerListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => TaxPayerListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("taxpayer_list failed: {err}"),
        },
    }
}

/// Creates a record; fails when the TID is taken or a field is blank.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn taxpayer_create(
    tid: String,
    first_name: String,
    last_name: String,
    address: String,
) -> TaxPayerActionResponse {
    match with_service(|service| service.create_taxpayer(tid, first_name, last_name, address)) {
        Ok(_) => TaxPayerActionResponse::success("TaxPayer created."),
        Err(err) => TaxPayerActionResponse::failure(format!("taxpayer_create failed: {err}")),
    }
}

/// Looks a record up by TID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Absent records are reported with `ok = true` and `item = None`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn taxpayer_search(tid: String) -> TaxPayerSearchResponse {
    match with_service(|service| service.search_taxpayer(tid.as_str())) {
        Ok(Some(record)) => TaxPayerSearchResponse {
            ok: true,
            item: Some(record.into()),
            message: "Found 1 result.".to_string(),
        },
        Ok(None) => TaxPayerSearchResponse {
            ok: true,
            item: None,
            message: "No results.".to_string(),
        },
        Err(err) => TaxPayerSearchResponse {
            ok: false,
            item: None,
            message: format!("taxpayer_search failed: {err}"),
        },
    }
}

/// Updates first name, last name and address of an existing record.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A missing TID yields `ok = false, not_found = true`; storage is untouched.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn taxpayer_update(
    tid: String,
    first_name: String,
    last_name: String,
    address: String,
) -> TaxPayerActionResponse {
    match with_service(|service| service.update_taxpayer(tid, first_name, last_name, address)) {
        Ok(true) => TaxPayerActionResponse::success("TaxPayer updated."),
        Ok(false) => TaxPayerActionResponse {
            ok: false,
            not_found: true,
            message: "TaxPayer not found.".to_string(),
        },
        Err(err) => TaxPayerActionResponse::failure(format!("taxpayer_update failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_service<T>(
    f: impl FnOnce(&TaxPayerService<SqliteTaxPayerRepository<'_>>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    let repo = SqliteTaxPayerRepository::try_new(&conn)
        .map_err(|err| format!("repo init failed: {err}"))?;
    let service = TaxPayerService::new(repo);
    f(&service).map_err(|err| err.to_string())
}
