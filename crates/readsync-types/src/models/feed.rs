//! Feed model.

use serde::{Deserialize, Serialize};

/// A publisher feed mirrored from the upstream platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feed {
    /// Upstream identifier of the publisher
    pub id: String,
    /// Publisher title
    pub title: String,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Unix timestamp of the last successful article sync
    #[serde(default)]
    pub sync_time: i64,
    /// Unix timestamp of the newest article seen for this feed
    #[serde(default)]
    pub update_time: i64,
    /// Timestamp when the feed was subscribed locally
    pub created_at: i64,
}

impl Feed {
    /// Create a new feed that has never been synced.
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            intro: None,
            cover: None,
            sync_time: 0,
            update_time: 0,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_feed_never_synced() {
        let feed = Feed::new("pub-1".to_string(), "Daily Digest".to_string());
        assert_eq!(feed.sync_time, 0);
        assert_eq!(feed.update_time, 0);
    }
}
