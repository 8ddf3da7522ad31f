//! Pool status handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use super::error_response;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub day: String,
    pub accounts_total: usize,
    pub accounts_enabled: usize,
    pub quarantined_today: usize,
}

pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    let today = state.calendar().today();
    let accounts = state.store().list().await.map_err(|e| error_response(e.into()))?;

    let accounts_total = accounts.len();
    let accounts_enabled = accounts.iter().filter(|a| a.is_enabled()).count();

    Ok(Json(StatusResponse {
        quarantined_today: state.ledger().quarantined(&today),
        day: today.to_string(),
        accounts_total,
        accounts_enabled,
    }))
}
