//! TaxPayer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed create/read/update/list APIs over `taxpayers` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `TaxPayer::validate()` before SQL mutations.
//! - Updates never touch `tid`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::taxpayer::{TaxPayer, TaxPayerValidationError, Tid};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TAXPAYER_SELECT_SQL: &str = "SELECT
    tid,
    first_name,
    last_name,
    address
FROM taxpayers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for taxpayer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaxPayerValidationError),
    Db(DbError),
    NotFound(Tid),
    /// A record with this TID already exists.
    DuplicateTid(Tid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(tid) => write!(f, "taxpayer not found: {tid}"),
            Self::DuplicateTid(tid) => write!(f, "taxpayer already exists: {tid}"),
            Self::InvalidData(message) => write!(f, "invalid persisted taxpayer data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateTid(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaxPayerValidationError> for RepoError {
    fn from(value: TaxPayerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for taxpayer records.
pub trait TaxPayerRepository {
    /// Inserts a new record and returns its TID.
    fn create_taxpayer(&self, taxpayer: &TaxPayer) -> RepoResult<Tid>;
    /// Replaces the mutable fields of the record keyed by `taxpayer.tid`.
    fn update_taxpayer(&self, taxpayer: &TaxPayer) -> RepoResult<()>;
    fn get_taxpayer(&self, tid: &str) -> RepoResult<Option<TaxPayer>>;
    /// Lists every record ordered by TID.
    fn list_taxpayers(&self) -> RepoResult<Vec<TaxPayer>>;
    fn count_taxpayers(&self) -> RepoResult<u64>;
}

/// SQLite-backed taxpayer repository.
pub struct SqliteTaxPayerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaxPayerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails with `InvalidData` when the `taxpayers` table is missing, which
    /// means the connection did not go through `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'taxpayers'
            );",
            [],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::InvalidData(
                "taxpayers table missing; open the connection with open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl TaxPayerRepository for SqliteTaxPayerRepository<'_> {
    fn create_taxpayer(&self, taxpayer: &TaxPayer) -> RepoResult<Tid> {
        taxpayer.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO taxpayers (
                tid,
                first_name,
                last_name,
                address
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                taxpayer.tid.as_str(),
                taxpayer.first_name.as_str(),
                taxpayer.last_name.as_str(),
                taxpayer.address.as_str(),
            ],
        );

        match inserted {
            Ok(_) => Ok(taxpayer.tid.clone()),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateTid(taxpayer.tid.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_taxpayer(&self, taxpayer: &TaxPayer) -> RepoResult<()> {
        taxpayer.validate()?;

        let changed = self.conn.execute(
            "UPDATE taxpayers
             SET
                first_name = ?1,
                last_name = ?2,
                address = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE tid = ?4;",
            params![
                taxpayer.first_name.as_str(),
                taxpayer.last_name.as_str(),
                taxpayer.address.as_str(),
                taxpayer.tid.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(taxpayer.tid.clone()));
        }

        Ok(())
    }

    fn get_taxpayer(&self, tid: &str) -> RepoResult<Option<TaxPayer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TAXPAYER_SELECT_SQL} WHERE tid = ?1;"))?;

        let mut rows = stmt.query([tid])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_taxpayer_row(row)?));
        }

        Ok(None)
    }

    fn list_taxpayers(&self) -> RepoResult<Vec<TaxPayer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TAXPAYER_SELECT_SQL} ORDER BY tid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut taxpayers = Vec::new();

        while let Some(row) = rows.next()? {
            taxpayers.push(parse_taxpayer_row(row)?);
        }

        Ok(taxpayers)
    }

    fn count_taxpayers(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM taxpayers;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative taxpayer count `{count}`")))
    }
}

fn parse_taxpayer_row(row: &Row<'_>) -> RepoResult<TaxPayer> {
    let taxpayer = TaxPayer {
        tid: row.get("tid")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        address: row.get("address")?,
    };
    taxpayer.validate().map_err(|err| {
        RepoError::InvalidData(format!("row `{}` fails validation: {err}", taxpayer.tid))
    })?;
    Ok(taxpayer)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
                && (inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
    )
}
