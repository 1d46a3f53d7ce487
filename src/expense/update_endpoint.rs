//! Route handler for updating an expense.

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseId, ExpenseName, ExpenseState, update_expense, validate_cost},
    response::{ApiJson, success_message},
    timezone::current_month_and_year,
};

/// The body of an update-expense request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExpenseData {
    /// The id of the expense to update.
    pub id: ExpenseId,
    /// The new name.
    pub name: String,
    /// The new cost.
    pub cost: i64,
}

/// Overwrite an expense's name and cost and restamp its month to the
/// current month. The year and the approved/paid flags are untouched.
///
/// An id that matches no row is a silent no-op: the update affects zero
/// rows and the response is still a success.
///
/// # Errors
/// Returns a 400 response if the name is empty or the cost is out of range,
/// and a 500 response if the database write fails.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    ApiJson(data): ApiJson<UpdateExpenseData>,
) -> Result<Response, Error> {
    let name = ExpenseName::new(&data.name)?;
    let cost = validate_cost(data.cost)?;
    let (month, _) = current_month_and_year(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezone(state.local_timezone.clone()))?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let rows_affected = update_expense(data.id, name, cost, month, &connection)?;

    if rows_affected == 0 {
        tracing::info!("update for expense {} matched no rows", data.id);
    }

    Ok(success_message("Record updated successfully"))
}

#[cfg(test)]
mod update_endpoint_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        expense::{ExpenseName, create_expense, get_expense, test_state},
        response::ApiJson,
        timezone::current_month_and_year,
    };

    use super::{UpdateExpenseData, update_expense_endpoint};

    #[tokio::test]
    async fn update_restamps_month_but_not_year() {
        let state = test_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(ExpenseName::new_unchecked("Rent?"), 1000, 1, 1999, &connection).unwrap()
        };
        let (current_month, _) = current_month_and_year("Etc/UTC").unwrap();

        let response = update_expense_endpoint(
            State(state.clone()),
            ApiJson(UpdateExpenseData {
                id: expense.id,
                name: "Rent".to_owned(),
                cost: 1200,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let updated = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.name.as_ref(), "Rent");
        assert_eq!(updated.cost, 1200);
        assert_eq!(updated.month, current_month);
        assert_eq!(updated.year, 1999);
        assert!(!updated.approved);
        assert!(!updated.paid);
    }

    #[tokio::test]
    async fn update_with_unknown_id_still_succeeds() {
        let state = test_state();

        let response = update_expense_endpoint(
            State(state),
            ApiJson(UpdateExpenseData {
                id: 424242,
                name: "Ghost".to_owned(),
                cost: 1,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn update_rejects_invalid_cost() {
        let state = test_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(ExpenseName::new_unchecked("Rent"), 1000, 1, 2025, &connection).unwrap()
        };

        let result = update_expense_endpoint(
            State(state.clone()),
            ApiJson(UpdateExpenseData {
                id: expense.id,
                name: "Rent".to_owned(),
                cost: -5,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The row is untouched after a rejected update.
        let stored = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored.cost, 1000);
    }
}
