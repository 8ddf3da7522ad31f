//! API Routes
//!
//! REST endpoints for accounts, the login handshake, feeds, and status.

mod accounts;
mod feeds;
mod login;
mod status;


use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;

use readsync_types::TypedError;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Status
        .route("/status", get(status::get_status))
        // Accounts
        .route("/accounts", get(accounts::list_accounts))
        .route("/accounts/:id", delete(accounts::delete_account))
        // Login handshake
        .route("/login", post(login::start_login))
        .route("/login/:id", get(login::poll_login))
        // Feeds
        .route("/feeds", get(feeds::list_feeds).post(feeds::subscribe))
        .route("/feeds/:id/sync", post(feeds::sync_feed))
        .route("/feeds/:id/articles", get(feeds::list_articles))
}

/// Map a domain error onto an HTTP response tuple.
pub(crate) fn error_response(err: TypedError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}
