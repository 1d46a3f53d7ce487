//! Database operations for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpenseName},
};

/// Create an expense and return it with its generated id.
///
/// New expenses always start out unapproved and unpaid.
pub fn create_expense(
    name: ExpenseName,
    cost: i64,
    month: u8,
    year: i32,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expenses (name, cost, month, year, approved, paid)
         VALUES (?1, ?2, ?3, ?4, FALSE, FALSE);",
        (name.as_ref(), cost, month, year),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        name,
        cost,
        month,
        year,
        approved: false,
        paid: false,
    })
}

/// Retrieve a single expense by id.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "SELECT id, name, cost, month, year, approved, paid FROM expenses WHERE id = :id;",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses that have not been archived yet, ordered by
/// ascending id (insertion order).
pub fn get_unapproved_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    select_by_approved(false, connection)
}

/// Retrieve all archived expenses, ordered by ascending id.
pub fn get_approved_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    select_by_approved(true, connection)
}

fn select_by_approved(approved: bool, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, name, cost, month, year, approved, paid FROM expenses
             WHERE approved = :approved ORDER BY id ASC;",
        )?
        .query_map(&[(":approved", &approved)], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Overwrite an expense's name and cost and restamp its month to `month`.
///
/// The year, approved, and paid columns are left untouched. Returns the
/// number of rows affected, which is zero when `id` matches no row.
pub fn update_expense(
    id: ExpenseId,
    name: ExpenseName,
    cost: i64,
    month: u8,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "UPDATE expenses SET name = ?1, cost = ?2, month = ?3 WHERE id = ?4;",
            (name.as_ref(), cost, month, id),
        )
        .map_err(|error| error.into())
}

/// Delete an expense by id.
///
/// Returns the number of rows affected, which is zero when `id` matches no
/// row. Deleting the same id twice is not an error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = ?1;", [id])
        .map_err(|error| error.into())
}

/// Archive every pending expense into the billing period `month`/`year`.
///
/// This is a single conditional UPDATE so two concurrent archive calls
/// cannot both claim the same rows. Already-approved rows are untouched.
/// Returns the number of rows archived.
pub fn archive_expenses(month: u8, year: i32, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute(
            "UPDATE expenses SET approved = TRUE, month = ?1, year = ?2 WHERE approved = FALSE;",
            (month, year),
        )
        .map_err(|error| error.into())
}

/// Mark every expense archived into the billing period `month`/`year` as
/// paid.
///
/// Pending expenses and other billing periods are untouched. Returns the
/// number of rows affected, which is zero when the period holds no
/// archived expenses.
pub fn mark_expenses_paid(month: u8, year: i32, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute(
            "UPDATE expenses SET paid = TRUE
             WHERE approved = TRUE AND month = ?1 AND year = ?2;",
            (month, year),
        )
        .map_err(|error| error.into())
}

/// Move every expense archived into the billing period `month`/`year` back
/// to pending, undoing an archive.
///
/// The paid flag is reset along the way so the rows come back in the same
/// state a freshly created expense starts in. The stamped month and year
/// are kept. Returns the number of rows affected.
pub fn unapprove_expenses(month: u8, year: i32, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute(
            "UPDATE expenses SET approved = FALSE, paid = FALSE
             WHERE approved = TRUE AND month = ?1 AND year = ?2;",
            (month, year),
        )
        .map_err(|error| error.into())
}

/// Initialize the expenses table.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            cost INTEGER NOT NULL CHECK (cost >= 0 AND cost <= 10000000),
            month INTEGER NOT NULL CHECK (month >= 1 AND month <= 12),
            year INTEGER NOT NULL CHECK (year >= 1970 AND year <= 2999),
            approved BOOLEAN NOT NULL DEFAULT FALSE,
            paid BOOLEAN NOT NULL DEFAULT FALSE
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(Expense {
        id: row.get(0)?,
        name: ExpenseName::new_unchecked(&raw_name),
        cost: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
        approved: row.get(5)?,
        paid: row.get(6)?,
    })
}
