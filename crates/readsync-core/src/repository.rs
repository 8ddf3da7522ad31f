//! SQLite-backed storage for feeds and articles.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use readsync_types::{Article, Feed, RepoError};

/// Feeds/articles repository over a single SQLite file.
///
/// rusqlite connections are not Sync, so the connection sits behind a mutex
/// and all calls run on the blocking pool.
pub struct Repository {
    conn: Arc<Mutex<Connection>>,
}

impl Repository {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self, RepoError> {
        let conn = Connection::open(path)
            .map_err(|e| RepoError::Database { message: e.to_string() })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS feeds (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                intro TEXT,
                cover TEXT,
                sync_time INTEGER NOT NULL DEFAULT 0,
                update_time INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                feed_id TEXT NOT NULL,
                title TEXT NOT NULL,
                pic_url TEXT,
                published_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_articles_feed
                ON articles (feed_id, published_at DESC);",
        )
        .map_err(|e| RepoError::Database { message: e.to_string() })?;

        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T, RepoError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, RepoError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| RepoError::Database { message: "connection lock poisoned".to_string() })?;
            f(&conn)
        })
        .await
        .map_err(|e| RepoError::Database { message: format!("blocking task failed: {}", e) })?
    }

    /// Insert or refresh a feed row. Sync timestamps are preserved as
    /// passed in `feed`.
    pub async fn upsert_feed(&self, feed: &Feed) -> Result<(), RepoError> {
        let feed = feed.clone();
        self.run_blocking(move |conn| {
            conn.execute(
                "INSERT INTO feeds (id, title, intro, cover, sync_time, update_time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    intro = excluded.intro,
                    cover = excluded.cover,
                    sync_time = excluded.sync_time,
                    update_time = excluded.update_time",
                params![
                    feed.id,
                    feed.title,
                    feed.intro,
                    feed.cover,
                    feed.sync_time,
                    feed.update_time,
                    feed.created_at,
                ],
            )
            .map_err(|e| RepoError::Database { message: e.to_string() })?;
            Ok(())
        })
        .await
    }

    /// One feed by id.
    pub async fn get_feed(&self, id: &str) -> Result<Option<Feed>, RepoError> {
        let id = id.to_string();
        self.run_blocking(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, title, intro, cover, sync_time, update_time, created_at
                     FROM feeds WHERE id = ?1",
                )
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            let mut rows = stmt
                .query_map(params![id], row_to_feed)
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            match rows.next() {
                Some(row) => row
                    .map(Some)
                    .map_err(|e| RepoError::Database { message: e.to_string() }),
                None => Ok(None),
            }
        })
        .await
    }

    /// All feeds, oldest subscription first.
    pub async fn list_feeds(&self) -> Result<Vec<Feed>, RepoError> {
        self.run_blocking(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, title, intro, cover, sync_time, update_time, created_at
                     FROM feeds ORDER BY created_at ASC, id ASC",
                )
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            let rows = stmt
                .query_map([], row_to_feed)
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| RepoError::Database { message: e.to_string() })
        })
        .await
    }

    /// Record a successful sync: `sync_time` is when it ran, `update_time`
    /// the newest article seen.
    pub async fn update_feed_sync_time(
        &self,
        id: &str,
        sync_time: i64,
        update_time: i64,
    ) -> Result<(), RepoError> {
        let id = id.to_string();
        self.run_blocking(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE feeds SET sync_time = ?2, update_time = ?3 WHERE id = ?1",
                    params![id, sync_time, update_time],
                )
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            if changed == 0 {
                return Err(RepoError::NotFound { what: format!("feed {}", id) });
            }
            Ok(())
        })
        .await
    }

    /// Idempotent article upsert. Returns how many rows were written
    /// (replays of already-stored articles still count as writes).
    pub async fn upsert_articles(&self, articles: &[Article]) -> Result<usize, RepoError> {
        let articles = articles.to_vec();
        self.run_blocking(move |conn| {
            let mut written = 0;
            for article in &articles {
                written += conn
                    .execute(
                        "INSERT INTO articles (id, feed_id, title, pic_url, published_at)
                         VALUES (?1, ?2, ?3, ?4, ?5)
                         ON CONFLICT(id) DO UPDATE SET
                            title = excluded.title,
                            pic_url = excluded.pic_url,
                            published_at = excluded.published_at",
                        params![
                            article.id,
                            article.feed_id,
                            article.title,
                            article.pic_url,
                            article.published_at,
                        ],
                    )
                    .map_err(|e| RepoError::Database { message: e.to_string() })?;
            }
            Ok(written)
        })
        .await
    }

    /// Newest articles for a feed.
    pub async fn list_articles(
        &self,
        feed_id: &str,
        limit: usize,
    ) -> Result<Vec<Article>, RepoError> {
        let feed_id = feed_id.to_string();
        self.run_blocking(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, feed_id, title, pic_url, published_at
                     FROM articles WHERE feed_id = ?1
                     ORDER BY published_at DESC, id ASC LIMIT ?2",
                )
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            let rows = stmt
                .query_map(params![feed_id, limit as i64], |row| {
                    Ok(Article {
                        id: row.get(0)?,
                        feed_id: row.get(1)?,
                        title: row.get(2)?,
                        pic_url: row.get(3)?,
                        published_at: row.get(4)?,
                    })
                })
                .map_err(|e| RepoError::Database { message: e.to_string() })?;

            rows.collect::<Result<Vec<_>, _>>()
                .map_err(|e| RepoError::Database { message: e.to_string() })
        })
        .await
    }
}

fn row_to_feed(row: &rusqlite::Row<'_>) -> rusqlite::Result<Feed> {
    Ok(Feed {
        id: row.get(0)?,
        title: row.get(1)?,
        intro: row.get(2)?,
        cover: row.get(3)?,
        sync_time: row.get(4)?,
        update_time: row.get(5)?,
        created_at: row.get(6)?,
    })
}
