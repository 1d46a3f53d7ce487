//! The API endpoint URIs.

/// The root route which redirects to the log-in page.
pub const ROOT: &str = "/";
/// The main client page.
pub const CLIENT_VIEW: &str = "/client";
/// The page listing the current (unapproved) expenses.
pub const CLIENT_CURRENT_VIEW: &str = "/client/current";
/// The page listing archived billing periods.
pub const CLIENT_ARCHIVE_VIEW: &str = "/client/archive";
/// The log-in page.
pub const LOG_IN_VIEW: &str = "/client/login";
/// The static image asset tree.
pub const IMG: &str = "/img";
/// The static javascript asset tree.
pub const JS: &str = "/js";

/// The route for logging in.
pub const LOG_IN_API: &str = "/api/v1/login";
/// The route for logging out the current session.
pub const LOG_OUT_API: &str = "/api/v1/logout";
/// The route listing expenses that have not been archived yet.
pub const EXPENSE_UNAPPROVED: &str = "/api/v1/expense/unapproved";
/// The route listing archived expenses.
pub const EXPENSE_APPROVED: &str = "/api/v1/expense/approved";
/// The route for creating an expense.
pub const EXPENSE_CREATE: &str = "/api/v1/expense/create";
/// The route for updating an expense.
pub const EXPENSE_UPDATE: &str = "/api/v1/expense/update";
/// The route for deleting an expense.
pub const EXPENSE_DELETE: &str = "/api/v1/expense/delete";
/// The route for archiving all pending expenses into a billing period.
pub const EXPENSE_ARCHIVE: &str = "/api/v1/expense/archive";
/// The route for marking an archived billing period as paid.
pub const EXPENSE_PAID: &str = "/api/v1/expense/paid";
/// The route for reverting an archived billing period back to pending.
pub const EXPENSE_UNAPPROVE: &str = "/api/v1/expense/unapprove";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::CLIENT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CLIENT_CURRENT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CLIENT_ARCHIVE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);
        assert_endpoint_is_valid_uri(endpoints::IMG);
        assert_endpoint_is_valid_uri(endpoints::JS);

        assert_endpoint_is_valid_uri(endpoints::LOG_IN_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT_API);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_UNAPPROVED);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_APPROVED);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_CREATE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_UPDATE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_DELETE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_ARCHIVE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_PAID);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_UNAPPROVE);
    }
}
