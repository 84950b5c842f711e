//! User entity owned by the credential store.

use crate::{Role, UserProfile};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// process. Use [`UserProfile`] for anything that crosses a boundary.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// PHC-formatted Argon2 hash
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a freshly registered, active user
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            first_name,
            last_name,
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// True when this user owns the resource or is an administrator
    pub fn can_act_on(&self, owner_id: Uuid) -> bool {
        self.id == owner_id || self.role.is_admin()
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}
