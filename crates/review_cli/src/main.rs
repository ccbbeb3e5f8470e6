//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `review_core` linkage.
//! - Probe that the `reviews` table can be created on a real connection.
//!
//! Usage: `review_cli [DB_PATH]`. Without a path an in-memory database is used.

use review_core::db::{open_db, open_db_in_memory};
use review_core::{ReviewRepository, SqliteEmployeeLookup, SqliteReviewRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("review_cli version={}", env!("CARGO_PKG_VERSION"));

    match probe_reviews_table(std::env::args().nth(1)) {
        Ok(count) => {
            println!("review_core reviews_table=ok rows={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("review_core reviews_table=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn probe_reviews_table(db_path: Option<String>) -> Result<usize, Box<dyn std::error::Error>> {
    let conn = match db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let repo = SqliteReviewRepository::new(&conn, SqliteEmployeeLookup::new(&conn));
    repo.create_table()?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM reviews;", [], |row| row.get(0))?;
    Ok(usize::try_from(count)?)
}
