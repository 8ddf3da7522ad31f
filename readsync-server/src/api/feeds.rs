//! Feed handlers: list, subscribe, sync, articles.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use readsync_types::{Article, Feed};

use super::error_response;
use crate::state::AppState;

pub async fn list_feeds(
    State(state): State<AppState>,
) -> Result<Json<Vec<Feed>>, (StatusCode, String)> {
    let feeds = state.feeds().list().await.map_err(error_response)?;
    Ok(Json(feeds))
}

#[derive(Deserialize)]
pub struct SubscribeRequest {
    pub feed_id: String,
}

pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<Json<Feed>, (StatusCode, String)> {
    let feed = state.feeds().subscribe(&payload.feed_id).await.map_err(error_response)?;
    Ok(Json(feed))
}

#[derive(Serialize)]
pub struct SyncResult {
    pub feed_id: String,
    pub stored: usize,
}

pub async fn sync_feed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SyncResult>, (StatusCode, String)> {
    let stored = state.articles().sync_feed(&id).await.map_err(error_response)?;
    Ok(Json(SyncResult { feed_id: id, stored }))
}

#[derive(Deserialize)]
pub struct ListArticlesQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

pub async fn list_articles(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListArticlesQuery>,
) -> Result<Json<Vec<Article>>, (StatusCode, String)> {
    let articles = state
        .repository()
        .list_articles(&id, query.limit)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(articles))
}
