//! Database initialization, additive migrations, and the connect-retry
//! policy for opening the application database.

use std::{path::Path, thread, time::Duration};

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// How connection establishment is retried before giving up.
///
/// Only the initial open is retried; individual queries are not.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// How many times to attempt opening the connection.
    pub max_attempts: u32,
    /// How long to wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

/// Open the SQLite database at `path`, retrying per `policy`.
///
/// # Errors
/// Returns the last underlying SQL error once `policy.max_attempts` opens
/// have failed.
pub fn open_with_retry(path: &Path, policy: &RetryPolicy) -> Result<Connection, Error> {
    let mut last_error = rusqlite::Error::InvalidPath(path.to_path_buf());

    for attempt in 1..=policy.max_attempts.max(1) {
        match Connection::open(path) {
            Ok(connection) => return Ok(connection),
            Err(error) => {
                tracing::warn!(
                    "could not open database {} (attempt {attempt} of {}): {error}",
                    path.display(),
                    policy.max_attempts,
                );
                last_error = error;
            }
        }

        if attempt < policy.max_attempts {
            thread::sleep(policy.delay);
        }
    }

    Err(Error::SqlError(last_error))
}

/// Create the application tables and apply the additive column migrations.
///
/// Safe to call on every startup: the table create is `IF NOT EXISTS` and
/// columns are only added when absent.
///
/// # Errors
/// Returns an error if a DDL statement fails.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    // The original deployment grew these columns after the table was first
    // created, so databases from older versions may be missing them.
    add_column_if_missing(connection, "expenses", "year", "INTEGER NOT NULL DEFAULT 1970")?;
    add_column_if_missing(connection, "expenses", "paid", "BOOLEAN NOT NULL DEFAULT FALSE")?;

    Ok(())
}

/// Check-then-add a named column. Additive only, never drops or rewrites.
fn add_column_if_missing(
    connection: &Connection,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<(), Error> {
    let exists = connection
        .prepare("SELECT COUNT(*) FROM pragma_table_info(:table) WHERE name = :column")?
        .query_row(&[(":table", table), (":column", column)], |row| {
            row.get::<_, i64>(0)
        })?
        > 0;

    if !exists {
        tracing::info!("adding missing column {column} to table {table}");
        connection.execute(
            &format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"),
            (),
        )?;
    }

    Ok(())
}
