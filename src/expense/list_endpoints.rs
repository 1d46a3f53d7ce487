//! Route handlers for listing unapproved and approved expenses.

use axum::{extract::State, response::Response};

use crate::{
    Error,
    expense::{ExpenseState, get_approved_expenses, get_unapproved_expenses},
    response::expense_list,
};

/// List all expenses that have not been archived yet, ordered by ascending
/// id. An empty list is a success, not an error.
pub async fn get_unapproved_expenses_endpoint(
    State(state): State<ExpenseState>,
) -> Result<Response, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let expenses = get_unapproved_expenses(&connection)?;

    Ok(expense_list(
        "Here is the list of unapproved expenses.",
        expenses,
    ))
}

/// List all archived expenses, ordered by ascending id.
pub async fn get_approved_expenses_endpoint(
    State(state): State<ExpenseState>,
) -> Result<Response, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let expenses = get_approved_expenses(&connection)?;

    Ok(expense_list(
        "Here is the list of approved expenses.",
        expenses,
    ))
}
