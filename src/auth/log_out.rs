//! Route handler for logging out the current session.

use axum::response::{IntoResponse, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::invalidate_session_cookie, response::success_message};

/// Invalidate the session cookie unconditionally.
///
/// Idempotent: calling this with no active session still returns a success
/// envelope.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_session_cookie(jar);

    (jar, success_message("Logged out successfully")).into_response()
}
