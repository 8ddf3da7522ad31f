//! Article sync.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;

use readsync_types::{Article, RepoError, Result};

use crate::gateway::UpstreamGateway;
use crate::repository::Repository;
use crate::selector::AccountSelector;

/// Upstream page size for article listings.
const PAGE_SIZE: usize = 20;
/// Cap on pages fetched per sync run; deep history arrives over several runs.
const MAX_PAGES: usize = 5;

/// Wire shape of one article in the upstream listing.
#[derive(Debug, Deserialize)]
struct ArticleItem {
    id: String,
    title: String,
    #[serde(default)]
    pic_url: Option<String>,
    published_at: i64,
}

/// Fetches article listings from the upstream platform and persists them.
pub struct ArticleService {
    gateway: Arc<UpstreamGateway>,
    selector: Arc<AccountSelector>,
    repository: Arc<Repository>,
}

impl ArticleService {
    /// Wire the service against its collaborators.
    pub fn new(
        gateway: Arc<UpstreamGateway>,
        selector: Arc<AccountSelector>,
        repository: Arc<Repository>,
    ) -> Self {
        Self { gateway, selector, repository }
    }

    /// Sync one feed: page through the upstream article list, upsert the
    /// rows, then bump the feed's sync and update timestamps. Returns the
    /// number of articles stored.
    ///
    /// Each page picks a credential afresh, so a quarantine triggered by an
    /// earlier page rotates the pool mid-sync.
    pub async fn sync_feed(&self, feed_id: &str) -> Result<usize> {
        let feed = self
            .repository
            .get_feed(feed_id)
            .await?
            .ok_or_else(|| RepoError::NotFound { what: format!("feed {}", feed_id) })?;

        let mut items: Vec<ArticleItem> = Vec::new();
        for page in 1..=MAX_PAGES {
            let account = self.selector.pick().await?;
            let batch: Vec<ArticleItem> = self
                .gateway
                .send(
                    &account,
                    Method::GET,
                    &format!("/api/feeds/{}/articles?page={}", feed_id, page),
                    None,
                )
                .await?;

            let batch_len = batch.len();
            items.extend(batch);
            if batch_len < PAGE_SIZE {
                break;
            }
        }

        let articles: Vec<Article> = items
            .into_iter()
            .map(|item| Article {
                id: item.id,
                feed_id: feed.id.clone(),
                title: item.title,
                pic_url: item.pic_url,
                published_at: item.published_at,
            })
            .collect();

        let newest = articles.iter().map(|a| a.published_at).max().unwrap_or(feed.update_time);
        let stored = self.repository.upsert_articles(&articles).await?;

        let now = chrono::Utc::now().timestamp();
        self.repository.update_feed_sync_time(&feed.id, now, newest).await?;

        tracing::info!("synced feed {}: {} articles stored", feed.id, stored);
        Ok(stored)
    }
}
