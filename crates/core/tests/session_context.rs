//! Session context driven through the auth gateway port

mod support;

use std::sync::Arc;

use carbonwise_core::{AccessTokenProvider, InMemorySessionStore, SessionContext, SessionStore};
use carbonwise_domain::{BusinessRegistration, CarbonError, Credentials};
use support::remote::StaticAuthGateway;
use support::signed_in_session;

fn registration(email: &str) -> BusinessRegistration {
    BusinessRegistration {
        name: "Bright Bakery".to_string(),
        email: email.to_string(),
        password: "rise-early".to_string(),
        industry: "food".to_string(),
        size: "small".to_string(),
        address: serde_json::Map::new(),
    }
}

#[tokio::test]
async fn sign_in_persists_the_session() {
    let store = Arc::new(InMemorySessionStore::new());
    let context = SessionContext::new(store.clone());
    let gateway = StaticAuthGateway::new("correct horse");

    let business = context
        .sign_in(&gateway, &Credentials::new("me@evergreen.test", "correct horse"))
        .await
        .unwrap();

    assert_eq!(business.id, "biz-99");
    assert_eq!(business.email, "me@evergreen.test");
    assert!(context.is_authenticated().await);
    assert_eq!(context.access_token().await.as_deref(), Some("granted-token"));

    let persisted = store.load().await.unwrap().unwrap();
    assert_eq!(persisted.business, business);
}

#[tokio::test]
async fn failed_sign_in_leaves_context_signed_out() {
    let context = SessionContext::new(Arc::new(InMemorySessionStore::new()));
    let gateway = StaticAuthGateway::new("correct horse");

    let err = context
        .sign_in(&gateway, &Credentials::new("me@evergreen.test", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, CarbonError::Auth(_)));
    assert!(!context.is_authenticated().await);
}

#[tokio::test]
async fn register_signs_the_new_business_in() {
    let context = SessionContext::new(Arc::new(InMemorySessionStore::new()));
    let gateway = StaticAuthGateway::new("unused");

    let business = context.register(&gateway, &registration("hi@bakery.test")).await.unwrap();

    assert_eq!(business.name, "Bright Bakery");
    assert_eq!(business.email, "hi@bakery.test");
    assert!(context.is_authenticated().await);

    let err = context.register(&gateway, &registration("not-an-email")).await.unwrap_err();
    assert!(matches!(err, CarbonError::InvalidInput(_)));
    // The earlier session survives a failed registration.
    assert!(context.is_authenticated().await);
}

#[tokio::test]
async fn sign_out_clears_memory_and_store() {
    let store = Arc::new(InMemorySessionStore::with_session(signed_in_session()));
    let context = SessionContext::new(store.clone());
    assert!(context.load().await.is_some());

    context.sign_out().await.unwrap();

    assert!(!context.is_authenticated().await);
    assert!(context.business().await.is_none());
    assert!(store.load().await.unwrap().is_none());
    assert!(matches!(
        AccessTokenProvider::access_token(&context).await,
        Err(CarbonError::Auth(_))
    ));

    // Signing out twice is harmless.
    context.sign_out().await.unwrap();
}
