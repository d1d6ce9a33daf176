pub mod admins;
pub mod courses;
pub mod professors;
pub mod students;

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Opens the pool. Writers wait on each other through SQLite's busy timeout
/// instead of failing with "database is locked".
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Starts a transaction that holds the write lock from its first statement.
///
/// A deferred transaction that reads before writing cannot be upgraded while
/// another writer is active and fails immediately; taking the lock up front
/// makes concurrent mutations queue on the busy timeout instead.
async fn begin_write(db: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    db.begin_with("BEGIN IMMEDIATE").await
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Partial-update rule: a field counts only when it is supplied and non-empty.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
