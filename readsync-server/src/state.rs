//! Application State
//!
//! Holds the wired component graph for the server. Everything is an
//! explicit injected instance (store, ledger, calendar, gateway, services);
//! there are no module-level singletons.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use readsync_core::classifier::ClassifyRules;
use readsync_core::services::{ArticleService, FeedService, LoginService};
use readsync_core::{
    AccountSelector, AccountStore, Calendar, FileAccountStore, QuarantineLedger, Repository,
    UpstreamGateway,
};
use readsync_types::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub store: Arc<dyn AccountStore>,
    pub ledger: Arc<QuarantineLedger>,
    pub calendar: Calendar,
    pub repository: Arc<Repository>,
    pub articles: ArticleService,
    pub feeds: FeedService,
    pub login: LoginService,
}

impl AppState {
    /// Wire the full component graph from config and a data directory.
    pub fn initialize(config: &AppConfig, data_dir: &Path) -> Result<Self> {
        let calendar = Calendar::from_name(&config.timezone)?;
        let store: Arc<dyn AccountStore> = Arc::new(FileAccountStore::open(data_dir)?);
        let ledger = Arc::new(QuarantineLedger::new());
        let repository = Arc::new(Repository::open(&data_dir.join("readsync.db"))?);

        let gateway = Arc::new(UpstreamGateway::new(
            &config.upstream,
            Arc::clone(&store),
            Arc::clone(&ledger),
            calendar,
            ClassifyRules::default(),
        )?);
        let selector =
            Arc::new(AccountSelector::new(Arc::clone(&store), Arc::clone(&ledger), calendar));

        let articles = ArticleService::new(
            Arc::clone(&gateway),
            Arc::clone(&selector),
            Arc::clone(&repository),
        );
        let feeds = FeedService::new(
            Arc::clone(&gateway),
            Arc::clone(&selector),
            Arc::clone(&repository),
        );
        let login = LoginService::new(Arc::clone(&gateway), Arc::clone(&store));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                store,
                ledger,
                calendar,
                repository,
                articles,
                feeds,
                login,
            }),
        })
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.inner.store
    }

    pub fn ledger(&self) -> &QuarantineLedger {
        &self.inner.ledger
    }

    pub fn calendar(&self) -> Calendar {
        self.inner.calendar
    }

    pub fn repository(&self) -> &Repository {
        &self.inner.repository
    }

    pub fn articles(&self) -> &ArticleService {
        &self.inner.articles
    }

    pub fn feeds(&self) -> &FeedService {
        &self.inner.feeds
    }

    pub fn login(&self) -> &LoginService {
        &self.inner.login
    }
}
