//! Spendbook is a small self-hosted web service for tracking shared monthly
//! expenses.
//!
//! Users log in with a single operator-supplied credential pair, submit
//! expenses as they come up, and archive the pending batch into a billing
//! period once it has been approved. The library provides a JSON REST API
//! under `/api/v1` plus a handful of static client pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod db;
mod endpoints;
mod expense;
mod logging;
mod response;
mod routing;
mod timezone;

pub use app_state::AppState;
pub use auth::SharedCredentials;
pub use db::{RetryPolicy, initialize as initialize_db, open_with_retry};
pub use logging::logging_middleware;
pub use routing::build_router;

use crate::response::error_message;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client supplied a username/password pair that does not match the
    /// configured service credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session cookie was found in the request.
    #[error("Authentication required")]
    SessionMissing,

    /// The session cookie was present but its expiry has passed.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// The session cookie could not be parsed.
    ///
    /// This happens when a client sends a cookie that was signed with a
    /// different secret or has been tampered with.
    #[error("Invalid session, please log in again")]
    InvalidSessionCookie,

    /// An empty string was used as an expense name.
    #[error("Expense name cannot be empty")]
    EmptyExpenseName,

    /// The cost was outside the accepted range.
    #[error("cost {0} is out of range (must be between 0 and 10,000,000)")]
    CostOutOfRange(i64),

    /// The month was outside the 1-12 range.
    #[error("month {0} is out of range (must be between 1 and 12)")]
    MonthOutOfRange(u8),

    /// The year was outside the accepted range.
    #[error("year {0} is out of range (must be between 1970 and 2999)")]
    YearOutOfRange(i32),

    /// A write was rejected by one of the CHECK constraints on the expenses
    /// table. The service validates inputs before writing, so this only
    /// fires if a write path skips validation.
    #[error("the database rejected the write: {0}")]
    ConstraintViolation(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The configured timezone name did not resolve to a known timezone.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A session expiry date-time could not be formatted or parsed.
    #[error("could not process the session expiry date-time: {0}")]
    DateFormat(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 275 occurs when a CHECK constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 275 =>
            {
                Error::ConstraintViolation(desc.clone())
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidCredentials => StatusCode::FORBIDDEN,
            Error::SessionMissing | Error::SessionExpired | Error::InvalidSessionCookie => {
                StatusCode::UNAUTHORIZED
            }
            Error::EmptyExpenseName
            | Error::CostOutOfRange(_)
            | Error::MonthOutOfRange(_)
            | Error::YearOutOfRange(_)
            | Error::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidTimezone(_)
            | Error::DateFormat(_)
            | Error::DatabaseLock
            | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        error_message(status, &self.to_string())
    }
}
