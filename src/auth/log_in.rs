//! Route handler for logging in against the shared service credentials.

use axum::{extract::{FromRef, State}, response::{IntoResponse, Response}};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{SharedCredentials, cookie::SESSION_DURATION, set_session_cookie},
    response::{ApiJson, success_message},
};

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which a session is valid after logging in.
    pub session_duration: Duration,
    /// The single credential pair accepted by the service.
    pub credentials: SharedCredentials,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            session_duration: SESSION_DURATION,
            credentials: state.credentials.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The body of a log-in request.
///
/// The username and password are plain strings compared against the single
/// operator-supplied pair; there is no per-user lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Username entered during log-in.
    pub username: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On a match against the configured credentials, a session cookie valid
/// for seven days is set and a success envelope returned. On a mismatch,
/// the response is `403 Forbidden` with the failure envelope; no cookie is
/// set.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    ApiJson(data): ApiJson<LogInData>,
) -> Response {
    if !state.credentials.verify(&data.username, &data.password) {
        tracing::info!("rejected login attempt for username {:?}", data.username);
        return Error::InvalidCredentials.into_response();
    }

    match set_session_cookie(jar, state.session_duration) {
        Ok(updated_jar) => (updated_jar, success_message("Logged in successfully")).into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            Error::DateFormat(error.to_string()).into_response()
        }
    }
}
