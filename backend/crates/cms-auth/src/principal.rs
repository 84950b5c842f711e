use crate::{Claims, Result as AuthErrorResult};

use cms_core::Role;

use uuid::Uuid;

/// Verified identity available to handlers.
///
/// Built only from validated claims, so both the bearer and the session flow
/// hand the authorizer the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn from_claims(claims: Claims) -> AuthErrorResult<Self> {
        Ok(Self {
            user_id: claims.subject_id()?,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
