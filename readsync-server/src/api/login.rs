//! Login handshake handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use readsync_types::{LoginPoll, LoginSession};

use super::error_response;
use crate::state::AppState;

pub async fn start_login(
    State(state): State<AppState>,
) -> Result<Json<LoginSession>, (StatusCode, String)> {
    let session = state.login().start().await.map_err(error_response)?;
    Ok(Json(session))
}

pub async fn poll_login(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LoginPoll>, (StatusCode, String)> {
    let poll = state.login().poll(&id).await.map_err(error_response)?;
    Ok(Json(poll))
}
