use cms_auth::{AccountService, AuthSettings, Authenticator, Authorizer, Result as AuthErrorResult};
use cms_core::CredentialStore;
use cms_db::UserRepository;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared by every handler. The session and bearer routes see the same
/// authenticator instance.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub authenticator: Arc<Authenticator>,
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: AuthSettings) -> AuthErrorResult<Self> {
        let store: Arc<dyn CredentialStore> = Arc::new(UserRepository::new(pool.clone()));
        let authenticator = Arc::new(Authenticator::new(store.clone(), settings)?);
        let accounts = AccountService::new(store, Authorizer);

        Ok(Self {
            pool,
            authenticator,
            accounts,
        })
    }
}
