//! The JSON response envelopes shared by every API route.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::expense::Expense;

/// The envelope returned by routes that do not return data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// A human-readable description of the outcome.
    pub message: String,
}

/// The envelope returned by the expense list routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// A human-readable description of the outcome.
    pub message: String,
    /// The expenses matching the query, ordered by ascending id.
    pub expenses: Vec<Expense>,
}

/// A JSON body extractor whose rejection carries the failure envelope.
///
/// The stock [Json] extractor rejects malformed or mistyped bodies with a
/// plain-text response; API clients expect every failure to be the
/// `{success, message}` envelope, so the rejection is remapped to a
/// `400 Bad Request` envelope carrying the deserialization error.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(error_message(StatusCode::BAD_REQUEST, &rejection.body_text())),
        }
    }
}

/// Create a `200 OK` response with a success envelope.
pub fn success_message(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: message.to_owned(),
        }),
    )
        .into_response()
}

/// Create a failure envelope response with the given `status`.
pub fn error_message(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            success: false,
            message: message.to_owned(),
        }),
    )
        .into_response()
}

/// Create a `200 OK` response listing `expenses`.
pub fn expense_list(message: &str, expenses: Vec<Expense>) -> Response {
    (
        StatusCode::OK,
        Json(ExpenseListResponse {
            success: true,
            message: message.to_owned(),
            expenses,
        }),
    )
        .into_response()
}
