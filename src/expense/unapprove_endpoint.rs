//! Route handler for reverting an archived billing period back to pending.

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseState, unapprove_expenses, validate_month, validate_year},
    response::{ApiJson, success_message},
};

/// The body of an unapprove request: the billing period to revert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnapproveExpensesData {
    /// The billing month, 1-12.
    pub month: u8,
    /// The billing year.
    pub year: i32,
}

/// Move every expense archived into the supplied billing period back to
/// pending, undoing an archive.
///
/// The paid flag is reset along the way; the stamped month and year are
/// kept. A period with no archived expenses is a success that affects zero
/// rows.
///
/// # Errors
/// Returns a 400 response if the month or year is out of range, and a 500
/// response if the database write fails.
pub async fn unapprove_expenses_endpoint(
    State(state): State<ExpenseState>,
    ApiJson(data): ApiJson<UnapproveExpensesData>,
) -> Result<Response, Error> {
    let month = validate_month(data.month)?;
    let year = validate_year(data.year)?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let rows_affected = unapprove_expenses(month, year, &connection)?;

    tracing::info!("unapproved {rows_affected} expenses from {month}/{year}");

    Ok(success_message("Expenses unapproved successfully"))
}
