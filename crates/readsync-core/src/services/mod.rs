//! Business services on top of the containment core.
//!
//! These are thin: each outbound call asks the selector for a credential
//! and goes through the gateway; the interesting failure behavior lives
//! below them. Retry/backoff policy is deliberately left to callers.

mod articles;
mod feeds;
mod login;

pub use articles::ArticleService;
pub use feeds::FeedService;
pub use login::LoginService;
