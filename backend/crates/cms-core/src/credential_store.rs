//! Persistence contract for user records.
//!
//! The authenticator only ever talks to this trait. Uniqueness of username
//! and email is the store's job: `create` must report a lost race on either
//! column as [`StoreError::Conflict`](crate::StoreError::Conflict) rather than
//! relying on callers to pre-check.

use crate::{Role, StoreResult, User};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Match `identifier` against username OR email
    async fn find_by_username_or_email(&self, identifier: &str) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// All users ordered by creation time
    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn create(&self, user: &User) -> StoreResult<()>;

    // Writes below touch only the named columns. A concurrent write to any
    // other column of the same row survives.

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()>;

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> StoreResult<()>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> StoreResult<()>;

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<()>;

    /// Outer `None` leaves the column unchanged; `Some(None)` clears it
    async fn update_names(
        &self,
        id: Uuid,
        first_name: Option<Option<String>>,
        last_name: Option<Option<String>>,
    ) -> StoreResult<()>;
}
