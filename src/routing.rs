//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState,
    auth::{api_auth_guard, get_log_out, page_auth_guard, post_log_in},
    endpoints,
    expense::{
        archive_expenses_endpoint, create_expense_endpoint, delete_expense_endpoint,
        get_approved_expenses_endpoint, get_unapproved_expenses_endpoint,
        mark_expenses_paid_endpoint, unapprove_expenses_endpoint, update_expense_endpoint,
    },
    response::error_message,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT_API, get(get_log_out))
        .route_service(
            endpoints::LOG_IN_VIEW,
            ServeFile::new(state.asset_dir.join("login.html")),
        );

    let protected_pages = Router::new()
        .route_service(
            endpoints::CLIENT_VIEW,
            ServeFile::new(state.asset_dir.join("client.html")),
        )
        .route_service(
            endpoints::CLIENT_CURRENT_VIEW,
            ServeFile::new(state.asset_dir.join("current.html")),
        )
        .route_service(
            endpoints::CLIENT_ARCHIVE_VIEW,
            ServeFile::new(state.asset_dir.join("archive.html")),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            page_auth_guard,
        ));

    let protected_api = Router::new()
        .route(
            endpoints::EXPENSE_UNAPPROVED,
            get(get_unapproved_expenses_endpoint),
        )
        .route(
            endpoints::EXPENSE_APPROVED,
            get(get_approved_expenses_endpoint),
        )
        .route(endpoints::EXPENSE_CREATE, post(create_expense_endpoint))
        .route(endpoints::EXPENSE_UPDATE, put(update_expense_endpoint))
        .route(endpoints::EXPENSE_DELETE, delete(delete_expense_endpoint))
        .route(endpoints::EXPENSE_ARCHIVE, post(archive_expenses_endpoint))
        .route(endpoints::EXPENSE_PAID, post(mark_expenses_paid_endpoint))
        .route(
            endpoints::EXPENSE_UNAPPROVE,
            post(unapprove_expenses_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), api_auth_guard));

    protected_api
        .merge(protected_pages)
        .merge(unprotected_routes)
        .nest_service(endpoints::IMG, ServeDir::new(state.asset_dir.join("img")))
        .nest_service(endpoints::JS, ServeDir::new(state.asset_dir.join("js")))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the log-in page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LOG_IN_VIEW)
}

/// 404 handler: API paths get the JSON failure envelope, everything else
/// plain text.
async fn get_404_not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api") {
        error_message(
            StatusCode::NOT_FOUND,
            "the requested resource could not be found",
        )
    } else {
        (StatusCode::NOT_FOUND, "Not found").into_response()
    }
}
