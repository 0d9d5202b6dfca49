mod common;

use std::time::Duration;

use common::MockSpotify;
use spotdash::{
    api::{CallbackOutcome, CallbackParams},
    session::{MemorySessionStore, SESSION_IDLE_TIMEOUT, SessionStore},
    types::Token,
};

fn token(access: &str) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_at: i64::MAX,
    }
}

#[tokio::test]
async fn test_memory_store_set_get_clear() {
    let store = MemorySessionStore::default();
    assert!(store.get("s1").await.unwrap().is_none());

    store.set("s1", token("first")).await.unwrap();
    store.set("s2", token("other")).await.unwrap();
    assert_eq!(store.get("s1").await.unwrap(), Some(token("first")));

    // last write wins
    store.set("s1", token("second")).await.unwrap();
    assert_eq!(store.get("s1").await.unwrap().unwrap().access_token, "second");
    assert_eq!(store.len().await, 2);

    store.clear("s1").await.unwrap();
    assert!(store.get("s1").await.unwrap().is_none());
    assert_eq!(store.get("s2").await.unwrap(), Some(token("other")));

    // clearing twice is fine
    store.clear("s1").await.unwrap();
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_memory_store_count() {
    let store = MemorySessionStore::default();
    assert_eq!(store.count().await.unwrap(), 0);

    store.set("s1", token("first")).await.unwrap();
    store.set("s2", token("second")).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);
    assert!(!store.is_empty().await);
}

#[tokio::test]
async fn test_idle_session_misses_and_is_dropped() {
    let store = MemorySessionStore::with_idle_timeout(Duration::ZERO);

    store.set("s1", token("first")).await.unwrap();
    assert_eq!(store.len().await, 1);

    assert!(store.get("s1").await.unwrap().is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_set_sweeps_idle_sessions() {
    let store = MemorySessionStore::with_idle_timeout(Duration::ZERO);

    store.set("s1", token("first")).await.unwrap();
    store.set("s2", token("second")).await.unwrap();
    store.set("s3", token("third")).await.unwrap();

    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_active_session_survives_default_timeout() {
    let store = MemorySessionStore::default();
    assert!(SESSION_IDLE_TIMEOUT >= Duration::from_secs(60 * 60));

    store.set("s1", token("first")).await.unwrap();
    store.set("s2", token("second")).await.unwrap();
    assert_eq!(store.get("s1").await.unwrap(), Some(token("first")));
    assert_eq!(store.get("s1").await.unwrap(), Some(token("first")));
}

#[tokio::test]
async fn test_callback_outcome_authenticated() {
    let spotify = MockSpotify::default();
    let params = CallbackParams {
        code: Some("good-code".to_string()),
        ..Default::default()
    };

    match CallbackOutcome::resolve(&params, &spotify).await {
        CallbackOutcome::Authenticated(token) => {
            assert_eq!(token.access_token, "access-good-code")
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_callback_outcome_denied_includes_description() {
    let spotify = MockSpotify::default();
    let params = CallbackParams {
        code: Some("good-code".to_string()),
        error: Some("access_denied".to_string()),
        error_description: Some("user said no".to_string()),
    };

    match CallbackOutcome::resolve(&params, &spotify).await {
        CallbackOutcome::Denied(message) => assert_eq!(message, "access_denied: user said no"),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(spotify.calls().is_empty());
}

#[tokio::test]
async fn test_callback_outcome_exchange_failed() {
    let spotify = MockSpotify::default();
    let params = CallbackParams {
        code: Some("bad-code".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        CallbackOutcome::resolve(&params, &spotify).await,
        CallbackOutcome::ExchangeFailed(_)
    ));
}

#[tokio::test]
async fn test_callback_outcome_malformed() {
    let spotify = MockSpotify::default();

    for params in [
        CallbackParams::default(),
        CallbackParams {
            code: Some(String::new()),
            ..Default::default()
        },
    ] {
        assert!(matches!(
            CallbackOutcome::resolve(&params, &spotify).await,
            CallbackOutcome::Malformed
        ));
    }
    assert!(spotify.calls().is_empty());
}
