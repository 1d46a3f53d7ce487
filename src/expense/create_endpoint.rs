//! Route handler for creating an expense.

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseName, ExpenseState, create_expense, validate_cost},
    response::{ApiJson, success_message},
    timezone::current_month_and_year,
};

/// The body of a create-expense request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseData {
    /// What the expense was for.
    pub name: String,
    /// The cost in the currency's minor unit.
    pub cost: i64,
}

/// Create an expense stamped with the current month and year.
///
/// New expenses start out unapproved and unpaid.
///
/// # Errors
/// Returns a 400 response if the name is empty or the cost is out of range,
/// and a 500 response if the database write fails.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    ApiJson(data): ApiJson<CreateExpenseData>,
) -> Result<Response, Error> {
    let name = ExpenseName::new(&data.name)?;
    let cost = validate_cost(data.cost)?;
    let (month, year) = current_month_and_year(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezone(state.local_timezone.clone()))?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let expense = create_expense(name, cost, month, year, &connection)?;

    tracing::info!(
        "created expense {} ({}) for {}/{}",
        expense.id,
        expense.name.as_ref(),
        expense.month,
        expense.year
    );

    Ok(success_message(&format!(
        "Record added successfully with id {}",
        expense.id
    )))
}

#[cfg(test)]
mod create_endpoint_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        expense::{get_unapproved_expenses, test_state},
        response::{ApiJson, MessageResponse},
        timezone::current_month_and_year,
    };

    use super::{CreateExpenseData, create_expense_endpoint};

    async fn read_message(response: axum::response::Response) -> MessageResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_stamps_current_period_and_defaults() {
        let state = test_state();
        let (want_month, want_year) = current_month_and_year("Etc/UTC").unwrap();

        let response = create_expense_endpoint(
            State(state.clone()),
            ApiJson(CreateExpenseData {
                name: "Internet".to_owned(),
                cost: 6000,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_message(response).await;
        assert!(body.success);

        let expenses =
            get_unapproved_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].name.as_ref(), "Internet");
        assert_eq!(expenses[0].cost, 6000);
        assert_eq!(expenses[0].month, want_month);
        assert_eq!(expenses[0].year, want_year);
        assert!(!expenses[0].approved);
        assert!(!expenses[0].paid);
    }

    #[tokio::test]
    async fn create_returns_generated_id_in_message() {
        let state = test_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            ApiJson(CreateExpenseData {
                name: "Internet".to_owned(),
                cost: 6000,
            }),
        )
        .await
        .unwrap();

        let body = read_message(response).await;
        let expenses =
            get_unapproved_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert!(body.message.contains(&expenses[0].id.to_string()));
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let state = test_state();

        let result = create_expense_endpoint(
            State(state.clone()),
            ApiJson(CreateExpenseData {
                name: "  ".to_owned(),
                cost: 6000,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let expenses =
            get_unapproved_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_cost() {
        let state = test_state();

        let result = create_expense_endpoint(
            State(state),
            ApiJson(CreateExpenseData {
                name: "Internet".to_owned(),
                cost: 10_000_001,
            }),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_message(response).await;
        assert!(!body.success);
    }
}
