use crate::{AuthError, Principal, Result as AuthErrorResult};

use cms_core::Role;

use uuid::Uuid;

/// What a route requires of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any holder of a valid token
    Authenticated,
    /// Role must be one of the listed roles
    Roles(&'static [Role]),
}

impl AccessPolicy {
    pub const ADMIN_ONLY: AccessPolicy = AccessPolicy::Roles(&[Role::Admin]);
    pub const EDITORS: AccessPolicy = AccessPolicy::Roles(&[Role::Admin, Role::Editor]);
}

/// Stateless role and ownership checks.
///
/// Identity has already been established by the time these run; every
/// failure here is `Forbidden`, never `Unauthenticated`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authorizer;

impl Authorizer {
    #[track_caller]
    pub fn authorize(&self, principal: &Principal, policy: AccessPolicy) -> AuthErrorResult<()> {
        match policy {
            AccessPolicy::Authenticated => Ok(()),
            AccessPolicy::Roles(allowed) if allowed.contains(&principal.role) => Ok(()),
            AccessPolicy::Roles(allowed) => {
                let allowed = allowed
                    .iter()
                    .map(Role::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                log::warn!(
                    "Forbidden: user {} has role {}, route requires one of [{allowed}]",
                    principal.user_id,
                    principal.role
                );
                Err(AuthError::forbidden(format!(
                    "Role {} is not permitted; requires one of [{allowed}]",
                    principal.role
                )))
            }
        }
    }

    /// Owner of the resource, or an Admin
    #[track_caller]
    pub fn authorize_owner(&self, principal: &Principal, owner_id: Uuid) -> AuthErrorResult<()> {
        if principal.user_id == owner_id || principal.is_admin() {
            return Ok(());
        }

        log::warn!(
            "Forbidden: user {} attempted to modify resource owned by {owner_id}",
            principal.user_id
        );
        Err(AuthError::forbidden(
            "Only the owner or an administrator may modify this resource",
        ))
    }
}
