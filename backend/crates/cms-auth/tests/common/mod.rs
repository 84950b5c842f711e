#![allow(dead_code)]

use cms_auth::{
    AuthSettings, Authenticator, PasswordConfig, Registration, SigningKey, TokenConfig,
};
use cms_core::{CredentialStore, Role, UserProfile};
use cms_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

pub struct TestContext {
    pub store: Arc<dyn CredentialStore>,
    pub authenticator: Authenticator,
}

/// Settings with cheap hashing and no login throttling
pub fn test_settings() -> AuthSettings {
    let token = TokenConfig::new(SigningKey::Configured(TEST_SECRET.as_bytes().to_vec()));
    AuthSettings {
        password: PasswordConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
            min_length: 8,
        },
        login_rate_limit: None,
        ..AuthSettings::new(token)
    }
}

pub async fn create_store() -> Arc<dyn CredentialStore> {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    cms_db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    Arc::new(UserRepository::new(pool))
}

pub async fn setup() -> TestContext {
    setup_with(test_settings()).await
}

pub async fn setup_with(settings: AuthSettings) -> TestContext {
    let store = create_store().await;
    let authenticator =
        Authenticator::new(store.clone(), settings).expect("Failed to build authenticator");

    TestContext {
        store,
        authenticator,
    }
}

pub fn registration(username: &str, email: &str, password: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        first_name: None,
        last_name: None,
    }
}

impl TestContext {
    pub async fn register(&self, username: &str, email: &str, password: &str) -> UserProfile {
        self.authenticator
            .register(registration(username, email, password))
            .await
            .expect("Failed to register test user")
    }

    pub async fn set_role(&self, username: &str, role: Role) {
        let user = self
            .store
            .find_by_username(username)
            .await
            .unwrap()
            .expect("user exists");
        self.store.set_role(user.id, role).await.unwrap();
    }

    pub async fn set_active(&self, username: &str, is_active: bool) {
        let user = self
            .store
            .find_by_username(username)
            .await
            .unwrap()
            .expect("user exists");
        self.store.set_active(user.id, is_active).await.unwrap();
    }
}

pub fn short_lived(settings: AuthSettings, expiry: Duration) -> AuthSettings {
    AuthSettings {
        token: settings.token.with_expiry(expiry),
        ..settings
    }
}
