//! Shared test helpers for `carbonwise-core` integration tests.
//!
//! Lightweight mocks for the remote calculator and auth gateway so the
//! service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod remote;

use std::sync::Arc;

use carbonwise_core::{InMemorySessionStore, SessionContext};
use carbonwise_domain::{BusinessIdentity, Session};

/// A complete session for the business used throughout the tests.
pub fn signed_in_session() -> Session {
    Session {
        access_token: "test-token".to_string(),
        business: BusinessIdentity {
            id: "biz-42".to_string(),
            name: "Northwind Traders".to_string(),
            email: "ops@northwind.test".to_string(),
        },
    }
}

/// A session context that has already loaded a signed-in session.
pub async fn signed_in_context() -> (Arc<SessionContext>, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::with_session(signed_in_session()));
    let context = Arc::new(SessionContext::new(store.clone()));
    context.load().await;
    (context, store)
}

/// A signed-out session context over an empty store.
pub fn signed_out_context() -> Arc<SessionContext> {
    Arc::new(SessionContext::new(Arc::new(InMemorySessionStore::new())))
}

/// Assert two tonnages agree to within floating-point noise.
pub fn assert_tons(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected} t, got {actual} t");
}
