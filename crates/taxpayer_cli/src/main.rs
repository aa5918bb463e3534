//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taxpayer_core` linkage and print the stored records as a table.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `taxpayer_cli [db_path]`; falls back to `TAXPAYER_DB_PATH`, then to
//! a file in the system temp directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taxpayer_core::db::open_db;
use taxpayer_core::{render_table, SqliteTaxPayerRepository, TaxPayerApp, TaxPayerService};

const DB_FILE_NAME: &str = "taxpayer_records.sqlite3";

fn main() -> ExitCode {
    println!("taxpayer_core ping={}", taxpayer_core::ping());
    println!("taxpayer_core version={}", taxpayer_core::core_version());

    let db_path = resolve_db_path(std::env::args().nth(1));
    match print_records(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taxpayer_cli failed for `{}`: {err}", db_path.display());
            ExitCode::FAILURE
        }
    }
}

fn print_records(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let service = TaxPayerService::new(SqliteTaxPayerRepository::try_new(&conn)?);
    let mut app = TaxPayerApp::new(service);
    if !app.load() {
        return Err("listing records failed".into());
    }

    println!("taxpayer_core records={}", app.records().len());
    println!("{}", render_table(&app.visible_rows()));
    let total = app.records().len();
    println!(
        "page {}/{}",
        app.table().effective_page(total),
        app.table().page_count(total)
    );
    Ok(())
}

fn resolve_db_path(arg: Option<String>) -> PathBuf {
    arg.into_iter()
        .chain(std::env::var("TAXPAYER_DB_PATH").ok())
        .map(|raw| raw.trim().to_string())
        .find(|raw| !raw.is_empty())
        .map_or_else(|| std::env::temp_dir().join(DB_FILE_NAME), PathBuf::from)
}
