#![allow(dead_code)]

use carbonwise_app::AppContext;
use carbonwise_domain::{ApiConfig, BusinessIdentity, Config, Session, SessionConfig};
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "app-test-token";

/// Context wired to `base_url`, with the session file in a fresh temp dir
pub struct TestApp {
    pub ctx: AppContext,
    /// Keep temporary directory alive for the lifetime of the context.
    pub temp_dir: TempDir,
}

pub fn test_config(base_url: &str, temp_dir: &TempDir) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            max_attempts: 1,
            remote_enabled: true,
        },
        session: SessionConfig { path: temp_dir.path().join("session.json") },
    }
}

pub async fn setup_app(base_url: &str) -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let ctx = AppContext::new_with_config(test_config(base_url, &temp_dir))
        .await
        .expect("context should build");
    TestApp { ctx, temp_dir }
}

/// Same as [`setup_app`] but with a session already on disk
pub async fn setup_signed_in_app(base_url: &str) -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let config = test_config(base_url, &temp_dir);
    std::fs::write(
        &config.session.path,
        serde_json::to_vec(&session()).expect("session should serialize"),
    )
    .expect("failed to write session file");

    let ctx = AppContext::new_with_config(config).await.expect("context should build");
    TestApp { ctx, temp_dir }
}

pub fn session() -> Session {
    Session {
        access_token: TEST_TOKEN.to_string(),
        business: BusinessIdentity {
            id: "biz-7".to_string(),
            name: "Greenfield Bakery".to_string(),
            email: "owner@greenfield.test".to_string(),
        },
    }
}
