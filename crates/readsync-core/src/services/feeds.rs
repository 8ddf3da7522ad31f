//! Feed subscription and metadata.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;

use readsync_types::{Feed, Result};

use crate::gateway::UpstreamGateway;
use crate::repository::Repository;
use crate::selector::AccountSelector;

/// Wire shape of publisher metadata upstream.
#[derive(Debug, Deserialize)]
pub struct FeedMeta {
    /// Upstream publisher id
    pub id: String,
    /// Publisher title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub intro: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub cover: Option<String>,
}

/// Manages locally mirrored feeds.
pub struct FeedService {
    gateway: Arc<UpstreamGateway>,
    selector: Arc<AccountSelector>,
    repository: Arc<Repository>,
}

impl FeedService {
    /// Wire the service against its collaborators.
    pub fn new(
        gateway: Arc<UpstreamGateway>,
        selector: Arc<AccountSelector>,
        repository: Arc<Repository>,
    ) -> Self {
        Self { gateway, selector, repository }
    }

    /// Fetch publisher metadata from the upstream platform.
    pub async fn fetch_meta(&self, feed_id: &str) -> Result<FeedMeta> {
        let account = self.selector.pick().await?;
        let meta: FeedMeta = self
            .gateway
            .send(&account, Method::GET, &format!("/api/feeds/{}", feed_id), None)
            .await?;
        Ok(meta)
    }

    /// Subscribe to a publisher: fetch its metadata and persist the feed
    /// row. Subscribing twice refreshes the metadata.
    pub async fn subscribe(&self, feed_id: &str) -> Result<Feed> {
        let meta = self.fetch_meta(feed_id).await?;

        let mut feed = match self.repository.get_feed(&meta.id).await? {
            Some(existing) => existing,
            None => Feed::new(meta.id.clone(), meta.title.clone()),
        };
        feed.title = meta.title;
        feed.intro = meta.intro;
        feed.cover = meta.cover;

        self.repository.upsert_feed(&feed).await?;
        tracing::info!("subscribed feed {} ({})", feed.id, feed.title);
        Ok(feed)
    }

    /// All locally mirrored feeds.
    pub async fn list(&self) -> Result<Vec<Feed>> {
        Ok(self.repository.list_feeds().await?)
    }
}
