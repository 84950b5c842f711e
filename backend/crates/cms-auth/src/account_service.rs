//! User management gated by the authorizer.
//!
//! Every operation takes the acting [`Principal`] and performs its own
//! authorization check, so the session and bearer front ends cannot drift.

use crate::{AccessPolicy, AuthError, Authorizer, Principal, Result as AuthErrorResult};

use cms_core::validation::validate_name;
use cms_core::{CredentialStore, User, UserProfile};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::info;
use uuid::Uuid;

/// Partial update of the names on a profile; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    authorizer: Authorizer,
}

impl AccountService {
    pub fn new(store: Arc<dyn CredentialStore>, authorizer: Authorizer) -> Self {
        Self { store, authorizer }
    }

    async fn load(&self, id: Uuid) -> AuthErrorResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound {
                id,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Admin only
    pub async fn list(&self, actor: &Principal) -> AuthErrorResult<Vec<UserProfile>> {
        self.authorizer.authorize(actor, AccessPolicy::ADMIN_ONLY)?;

        let users = self.store.list().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// The user themself, or an Admin
    pub async fn get(&self, actor: &Principal, id: Uuid) -> AuthErrorResult<UserProfile> {
        self.authorizer.authorize_owner(actor, id)?;

        Ok(self.load(id).await?.profile())
    }

    /// The user themself, or an Admin
    pub async fn update_profile(
        &self,
        actor: &Principal,
        id: Uuid,
        update: ProfileUpdate,
    ) -> AuthErrorResult<UserProfile> {
        self.authorizer.authorize_owner(actor, id)?;

        let first_name = update
            .first_name
            .map(|name| clean_name("first_name", name))
            .transpose()?;
        let last_name = update
            .last_name
            .map(|name| clean_name("last_name", name))
            .transpose()?;

        self.store.update_names(id, first_name, last_name).await?;
        info!("Profile of user {id} updated by {}", actor.user_id);

        Ok(self.load(id).await?.profile())
    }

    /// Admin only. Admins cannot deactivate themselves.
    pub async fn set_active(
        &self,
        actor: &Principal,
        id: Uuid,
        is_active: bool,
    ) -> AuthErrorResult<UserProfile> {
        self.authorizer.authorize(actor, AccessPolicy::ADMIN_ONLY)?;

        if actor.user_id == id && !is_active {
            return Err(AuthError::validation(
                "is_active",
                "Administrators cannot deactivate their own account",
            ));
        }

        self.store.set_active(id, is_active).await?;
        info!(
            "User {id} {} by {}",
            if is_active { "activated" } else { "deactivated" },
            actor.user_id
        );

        Ok(self.load(id).await?.profile())
    }
}

/// Blank clears the column
fn clean_name(field: &str, name: String) -> AuthErrorResult<Option<String>> {
    validate_name(field, Some(&name))?;
    Ok(Some(name).filter(|n| !n.trim().is_empty()))
}
