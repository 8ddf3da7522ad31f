use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use readsync_types::{Account, AccountError, AccountStatus, UpstreamConfig, UpstreamError};

use super::UpstreamGateway;
use crate::calendar::Calendar;
use crate::classifier::ClassifyRules;
use crate::quarantine::QuarantineLedger;
use crate::selector::AccountSelector;
use crate::store::{AccountStore, MemoryAccountStore};

struct Fixture {
    gateway: UpstreamGateway,
    store: Arc<MemoryAccountStore>,
    ledger: Arc<QuarantineLedger>,
    calendar: Calendar,
}

fn account(id: &str) -> Account {
    Account::new(id.to_string(), format!("token-{}", id))
}

fn fixture(base_url: String, accounts: Vec<Account>) -> Fixture {
    let store = Arc::new(MemoryAccountStore::with_accounts(accounts));
    let ledger = Arc::new(QuarantineLedger::new());
    let calendar = Calendar::from_name("Asia/Shanghai").expect("known timezone");
    let config = UpstreamConfig { base_url, request_timeout_secs: 5 };

    let gateway = UpstreamGateway::new(
        &config,
        Arc::clone(&store) as Arc<dyn AccountStore>,
        Arc::clone(&ledger),
        calendar,
        ClassifyRules::default(),
    )
    .expect("gateway config");

    Fixture { gateway, store, ledger, calendar }
}

#[tokio::test]
async fn test_success_flows_back_unchanged_with_no_side_effects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .and(header("x-account-id", "acc-1"))
        .and(header("authorization", "Bearer token-acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let fx = fixture(server.uri(), vec![account("acc-1")]);
    let acc = account("acc-1");

    let response: Value =
        fx.gateway.send(&acc, Method::GET, "/api/ping", None).await.expect("success");
    assert_eq!(response["ok"], json!(true));

    assert!(!fx.ledger.is_quarantined(&fx.calendar.today(), "acc-1"));
    assert!(fx.store.get("acc-1").await.expect("get").is_enabled());
}

#[tokio::test]
async fn test_auth_failure_disables_account_and_reraises() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feeds/pub-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let fx = fixture(server.uri(), vec![account("acc-1"), account("acc-2")]);
    let acc = account("acc-1");

    let err = fx
        .gateway
        .send::<Value>(&acc, Method::GET, "/api/feeds/pub-1", None)
        .await
        .expect_err("must re-raise");
    assert_eq!(
        err,
        UpstreamError::Api {
            account_id: Some("acc-1".to_string()),
            status: 401,
            body: "unauthorized".to_string(),
        }
    );

    // Durable one-way transition, not a quarantine entry.
    let stored = fx.store.get("acc-1").await.expect("get");
    assert!(!stored.is_enabled());
    assert_eq!(stored.disabled_reason.as_deref(), Some("auth revoked by upstream"));
    assert!(!fx.ledger.is_quarantined(&fx.calendar.today(), "acc-1"));

    // Selection moves on to the next account, even with a fresh ledger.
    let selector =
        AccountSelector::new(Arc::clone(&fx.store) as Arc<dyn AccountStore>, fx.ledger, fx.calendar);
    assert_eq!(selector.pick().await.expect("pick").id, "acc-2");
}

#[tokio::test]
async fn test_rate_limit_quarantines_for_current_day_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feeds/pub-1/articles"))
        .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
        .mount(&server)
        .await;

    let fx = fixture(server.uri(), vec![account("acc-1")]);
    let acc = account("acc-1");

    let err = fx
        .gateway
        .send::<Value>(&acc, Method::GET, "/api/feeds/pub-1/articles", None)
        .await
        .expect_err("must re-raise");
    assert!(matches!(err, UpstreamError::Api { status: 429, .. }));

    let today = fx.calendar.today();
    let tomorrow = fx.calendar.day_key(chrono::Utc::now() + chrono::Duration::days(1));
    assert!(fx.ledger.is_quarantined(&today, "acc-1"));
    assert!(!fx.ledger.is_quarantined(&tomorrow, "acc-1"));

    // Status untouched: quarantine is not a status transition.
    assert!(fx.store.get("acc-1").await.expect("get").is_enabled());
}

#[tokio::test]
async fn test_unknown_failure_quarantines_conservatively() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(500).set_body_string("wedged"))
        .mount(&server)
        .await;

    let fx = fixture(server.uri(), vec![account("acc-1")]);
    let acc = account("acc-1");

    let err =
        fx.gateway.send::<Value>(&acc, Method::GET, "/api/ping", None).await.expect_err("fails");
    assert!(matches!(err, UpstreamError::Api { status: 500, .. }));

    assert!(fx.ledger.is_quarantined(&fx.calendar.today(), "acc-1"));
    assert!(fx.store.get("acc-1").await.expect("get").is_enabled());
}

#[tokio::test]
async fn test_transport_failure_classifies_as_unknown() {
    // Nothing listens here; the connect fails fast.
    let fx = fixture("http://127.0.0.1:1".to_string(), vec![account("acc-1")]);
    let acc = account("acc-1");

    let err =
        fx.gateway.send::<Value>(&acc, Method::GET, "/api/ping", None).await.expect_err("fails");
    assert!(matches!(err, UpstreamError::Network { .. }));
    assert_eq!(err.account_id(), Some("acc-1"));

    assert!(fx.ledger.is_quarantined(&fx.calendar.today(), "acc-1"));
}

/// Store whose status writes always fail; containment must still re-raise
/// the original upstream failure.
struct BrokenStatusStore {
    inner: MemoryAccountStore,
}

#[async_trait]
impl AccountStore for BrokenStatusStore {
    async fn list(&self) -> Result<Vec<Account>, AccountError> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> Result<Account, AccountError> {
        self.inner.get(id).await
    }

    async fn upsert(&self, account: Account) -> Result<(), AccountError> {
        self.inner.upsert(account).await
    }

    async fn set_status(
        &self,
        _id: &str,
        _status: AccountStatus,
        _reason: Option<&str>,
    ) -> Result<(), AccountError> {
        Err(AccountError::Storage { message: "disk full".to_string() })
    }

    async fn delete(&self, id: &str) -> Result<(), AccountError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_containment_failure_never_masks_original_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let store: Arc<dyn AccountStore> = Arc::new(BrokenStatusStore {
        inner: MemoryAccountStore::with_accounts(vec![account("acc-1")]),
    });
    let ledger = Arc::new(QuarantineLedger::new());
    let calendar = Calendar::from_name("Asia/Shanghai").expect("known timezone");
    let config = UpstreamConfig { base_url: server.uri(), request_timeout_secs: 5 };
    let gateway =
        UpstreamGateway::new(&config, store, ledger, calendar, ClassifyRules::default())
            .expect("gateway config");

    let acc = account("acc-1");
    let err =
        gateway.send::<Value>(&acc, Method::GET, "/api/ping", None).await.expect_err("fails");

    // The upstream failure survives even though the disable write failed.
    assert!(matches!(err, UpstreamError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_public_calls_skip_identity_and_containment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "ls-1", "scan_url": "https://x/scan"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/login/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("wedged"))
        .mount(&server)
        .await;

    let fx = fixture(server.uri(), vec![account("acc-1")]);

    let started: Value = fx
        .gateway
        .send_public(Method::POST, "/api/login", Some(json!({})))
        .await
        .expect("public call");
    assert_eq!(started["id"], json!("ls-1"));

    let err = fx
        .gateway
        .send_public::<Value>(Method::GET, "/api/login/broken", None)
        .await
        .expect_err("fails");
    assert!(matches!(err, UpstreamError::Api { account_id: None, status: 500, .. }));

    // No account was involved, so nothing was contained.
    assert_eq!(fx.ledger.quarantined(&fx.calendar.today()), 0);
}

#[tokio::test]
async fn test_rotation_after_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feeds/pub-1/articles"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit"))
        .mount(&server)
        .await;

    let fx = fixture(server.uri(), vec![account("acc-a"), account("acc-b"), account("acc-c")]);
    let selector = AccountSelector::new(
        Arc::clone(&fx.store) as Arc<dyn AccountStore>,
        Arc::clone(&fx.ledger),
        fx.calendar,
    );

    let first = selector.pick().await.expect("pick");
    assert_eq!(first.id, "acc-a");

    let _ = fx
        .gateway
        .send::<Value>(&first, Method::GET, "/api/feeds/pub-1/articles", None)
        .await
        .expect_err("rate limited");

    // acc-a is out for the day; the pool rotates to acc-b.
    assert_eq!(selector.pick().await.expect("pick").id, "acc-b");
}
