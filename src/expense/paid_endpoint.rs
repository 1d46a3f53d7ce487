//! Route handler for marking an archived billing period as paid.

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseState, mark_expenses_paid, validate_month, validate_year},
    response::{ApiJson, success_message},
};

/// The body of a mark-paid request: the billing period to mark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkExpensesPaidData {
    /// The billing month, 1-12.
    pub month: u8,
    /// The billing year.
    pub year: i32,
}

/// Mark every expense archived into the supplied billing period as paid.
///
/// Pending expenses and other periods are untouched. A period with no
/// archived expenses is a success that affects zero rows.
///
/// # Errors
/// Returns a 400 response if the month or year is out of range, and a 500
/// response if the database write fails.
pub async fn mark_expenses_paid_endpoint(
    State(state): State<ExpenseState>,
    ApiJson(data): ApiJson<MarkExpensesPaidData>,
) -> Result<Response, Error> {
    let month = validate_month(data.month)?;
    let year = validate_year(data.year)?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let rows_affected = mark_expenses_paid(month, year, &connection)?;

    tracing::info!("marked {rows_affected} expenses in {month}/{year} as paid");

    Ok(success_message("Expenses marked as paid successfully"))
}

#[cfg(test)]
mod paid_endpoint_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        expense::{
            ExpenseName, archive_expenses, create_expense, get_approved_expenses, test_state,
        },
        response::ApiJson,
    };

    use super::{MarkExpensesPaidData, mark_expenses_paid_endpoint};

    #[tokio::test]
    async fn mark_paid_sets_the_flag_on_the_period() {
        let state = test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(ExpenseName::new_unchecked("Internet"), 6000, 1, 2025, &connection)
                .unwrap();
            archive_expenses(3, 2025, &connection).unwrap();
        }

        let response = mark_expenses_paid_endpoint(
            State(state.clone()),
            ApiJson(MarkExpensesPaidData {
                month: 3,
                year: 2025,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let approved = get_approved_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert!(approved[0].paid);
    }

    #[tokio::test]
    async fn mark_paid_with_empty_period_still_succeeds() {
        let state = test_state();

        let response = mark_expenses_paid_endpoint(
            State(state),
            ApiJson(MarkExpensesPaidData {
                month: 1,
                year: 2025,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn mark_paid_rejects_out_of_range_period() {
        let state = test_state();

        let result = mark_expenses_paid_endpoint(
            State(state),
            ApiJson(MarkExpensesPaidData {
                month: 0,
                year: 2025,
            }),
        )
        .await;

        assert_eq!(
            result.unwrap_err().into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
