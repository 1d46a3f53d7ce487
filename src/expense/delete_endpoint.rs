//! Route handler for deleting an expense.

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseId, ExpenseState, delete_expense},
    response::{ApiJson, success_message},
};

/// The body of a delete-expense request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExpenseData {
    /// The id of the expense to delete.
    pub id: ExpenseId,
}

/// Physically delete an expense.
///
/// Deleting an id that matches no row is a silent no-op, so the operation
/// is idempotent.
///
/// # Errors
/// Returns a 500 response if the database write fails.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    ApiJson(data): ApiJson<DeleteExpenseData>,
) -> Result<Response, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let rows_affected = delete_expense(data.id, &connection)?;

    if rows_affected == 0 {
        tracing::info!("delete for expense {} matched no rows", data.id);
    }

    Ok(success_message("Record deleted successfully"))
}
