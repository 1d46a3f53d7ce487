//! Session-cookie authentication: the shared service credentials, the
//! session cookie itself, the login/logout routes, and the middleware
//! guarding protected routes.

mod cookie;
mod credentials;
mod log_in;
mod log_out;
mod middleware;

pub use cookie::{
    COOKIE_SESSION, SESSION_DURATION, invalidate_session_cookie, set_session_cookie,
    verify_session,
};
pub use credentials::SharedCredentials;
pub use log_in::{LogInData, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, api_auth_guard, page_auth_guard};
