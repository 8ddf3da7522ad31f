//! Account management handlers: list, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use readsync_types::AccountStatus;

use super::error_response;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AccountInfo {
    pub id: String,
    pub name: Option<String>,
    pub status: AccountStatus,
    pub disabled_reason: Option<String>,
    pub quarantined_today: bool,
    pub last_used: i64,
}

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountInfo>>, (StatusCode, String)> {
    let today = state.calendar().today();

    let accounts = state.store().list().await.map_err(|e| error_response(e.into()))?;

    let infos: Vec<AccountInfo> = accounts
        .into_iter()
        .map(|a| AccountInfo {
            quarantined_today: state.ledger().is_quarantined(&today, &a.id),
            id: a.id,
            name: a.name,
            status: a.status,
            disabled_reason: a.disabled_reason,
            last_used: a.last_used,
        })
        .collect();
    Ok(Json(infos))
}

pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<bool>, (StatusCode, String)> {
    state.store().delete(&id).await.map_err(|e| error_response(e.into()))?;
    Ok(Json(true))
}
