//! The expense service: the domain model, database operations, and route
//! handlers for creating, listing, updating, deleting, and archiving
//! expenses.

mod archive_endpoint;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod list_endpoints;
mod models;
mod paid_endpoint;
mod unapprove_endpoint;
mod update_endpoint;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use archive_endpoint::archive_expenses_endpoint;
pub use create_endpoint::create_expense_endpoint;
pub use db::{
    archive_expenses, create_expense, create_expense_table, delete_expense, get_approved_expenses,
    get_expense, get_unapproved_expenses, mark_expenses_paid, unapprove_expenses, update_expense,
};
pub use delete_endpoint::delete_expense_endpoint;
pub use list_endpoints::{get_approved_expenses_endpoint, get_unapproved_expenses_endpoint};
pub use paid_endpoint::mark_expenses_paid_endpoint;
pub use unapprove_endpoint::unapprove_expenses_endpoint;
pub use models::{
    COST_MAX, COST_MIN, Expense, ExpenseId, ExpenseName, MONTH_MAX, MONTH_MIN, YEAR_MAX, YEAR_MIN,
    validate_cost, validate_month, validate_year,
};
pub use update_endpoint::update_expense_endpoint;

/// The state needed by the expense route handlers.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> ExpenseState {
    let connection = Connection::open_in_memory().unwrap();
    crate::db::initialize(&connection).expect("Could not initialize test database");

    ExpenseState {
        db_connection: Arc::new(Mutex::new(connection)),
        local_timezone: "Etc/UTC".to_owned(),
    }
}
