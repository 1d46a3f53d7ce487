//! Route handler for archiving pending expenses into a billing period.

use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseState, archive_expenses, validate_month, validate_year},
    response::{ApiJson, success_message},
};

/// The body of an archive request: the billing period to stamp onto every
/// pending expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveExpensesData {
    /// The billing month, 1-12.
    pub month: u8,
    /// The billing year.
    pub year: i32,
}

/// Archive every pending expense into the supplied billing period.
///
/// The transition is a single conditional UPDATE, so concurrent archive
/// calls cannot both claim the same rows. Archiving when nothing is
/// pending is a success that affects zero rows.
///
/// # Errors
/// Returns a 400 response if the month or year is out of range, and a 500
/// response if the database write fails.
pub async fn archive_expenses_endpoint(
    State(state): State<ExpenseState>,
    ApiJson(data): ApiJson<ArchiveExpensesData>,
) -> Result<Response, Error> {
    let month = validate_month(data.month)?;
    let year = validate_year(data.year)?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let rows_affected = archive_expenses(month, year, &connection)?;

    tracing::info!("archived {rows_affected} expenses into {month}/{year}");

    Ok(success_message("Expenses archived successfully"))
}

#[cfg(test)]
mod archive_endpoint_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        expense::{
            ExpenseName, create_expense, get_approved_expenses, get_unapproved_expenses, test_state,
        },
        response::ApiJson,
    };

    use super::{ArchiveExpensesData, archive_expenses_endpoint};

    #[tokio::test]
    async fn archive_moves_pending_expenses_into_the_period() {
        let state = test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_expense(ExpenseName::new_unchecked("Internet"), 6000, 1, 2025, &connection)
                .unwrap();
        }

        let response = archive_expenses_endpoint(
            State(state.clone()),
            ApiJson(ArchiveExpensesData {
                month: 3,
                year: 2025,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        let approved = get_approved_expenses(&connection).unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].month, 3);
        assert_eq!(approved[0].year, 2025);
        assert!(get_unapproved_expenses(&connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn archive_with_nothing_pending_still_succeeds() {
        let state = test_state();

        let response = archive_expenses_endpoint(
            State(state),
            ApiJson(ArchiveExpensesData {
                month: 1,
                year: 2025,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn archive_rejects_out_of_range_period() {
        let state = test_state();

        let result = archive_expenses_endpoint(
            State(state.clone()),
            ApiJson(ArchiveExpensesData {
                month: 13,
                year: 2025,
            }),
        )
        .await;
        assert_eq!(
            result.unwrap_err().into_response().status(),
            StatusCode::BAD_REQUEST
        );

        let result = archive_expenses_endpoint(
            State(state),
            ApiJson(ArchiveExpensesData {
                month: 6,
                year: 3000,
            }),
        )
        .await;
        assert_eq!(
            result.unwrap_err().into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
