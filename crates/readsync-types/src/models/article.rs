//! Article model.

use serde::{Deserialize, Serialize};

/// One published item belonging to a feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Upstream identifier of the article
    pub id: String,
    /// Feed this article belongs to
    pub feed_id: String,
    /// Article title
    pub title: String,
    /// Cover picture URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic_url: Option<String>,
    /// Unix timestamp the article was published
    pub published_at: i64,
}
