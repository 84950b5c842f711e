//! Credential verification and token issuance.
//!
//! The store and all key material are injected at construction; nothing here
//! reads globals or the environment. Both the session-cookie app and the
//! bearer API share one instance.

use crate::password_reset::DEFAULT_RESET_TTL;
use crate::{
    AuthError, IssuedToken, JwtIssuer, JwtValidator, LoginRateLimiter, PasswordConfig,
    PasswordResetTicket, PasswordVerifier, Principal, RateLimitConfig, ResetTicketIssuer,
    Result as AuthErrorResult, TokenConfig,
};

use cms_core::validation::{validate_email, validate_name, validate_password, validate_username};
use cms_core::{CredentialStore, Role, StoreError, UniqueField, User, UserProfile};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use uuid::Uuid;

/// Everything the authenticator needs besides the store
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token: TokenConfig,
    pub password: PasswordConfig,
    pub reset_ttl: Duration,
    /// `None` disables login throttling
    pub login_rate_limit: Option<RateLimitConfig>,
}

impl AuthSettings {
    pub fn new(token: TokenConfig) -> Self {
        Self {
            token,
            password: PasswordConfig::default(),
            reset_ttl: DEFAULT_RESET_TTL,
            login_rate_limit: Some(RateLimitConfig::default()),
        }
    }
}

/// Input to [`Authenticator::register`]
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: UserProfile,
}

pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    passwords: PasswordVerifier,
    issuer: JwtIssuer,
    validator: JwtValidator,
    resets: ResetTicketIssuer,
    login_limiter: Option<LoginRateLimiter>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, settings: AuthSettings) -> AuthErrorResult<Self> {
        if settings.token.signing_key.is_development() {
            warn!("Authenticator is using the DEVELOPMENT signing key; tokens are forgeable");
        }

        Ok(Self {
            passwords: PasswordVerifier::new(&settings.password)?,
            issuer: JwtIssuer::new(&settings.token),
            validator: JwtValidator::new(&settings.token),
            resets: ResetTicketIssuer::new(settings.token.signing_key.clone(), settings.reset_ttl),
            login_limiter: settings.login_rate_limit.map(LoginRateLimiter::new),
            store,
        })
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Forget throttle state for identifiers that have fully recovered
    pub fn prune_login_throttle(&self) {
        if let Some(limiter) = &self.login_limiter {
            limiter.shrink();
        }
    }

    /// Verify `identifier` (username or email) and `password`, then issue a token.
    ///
    /// Unknown identifier and wrong password are indistinguishable to the
    /// caller. The active flag is consulted only after the password verifies.
    pub async fn login(&self, identifier: &str, password: &str) -> AuthErrorResult<LoginOutcome> {
        let identifier = identifier.trim();

        if let Some(limiter) = &self.login_limiter
            && let Err(e) = limiter.check(identifier)
        {
            warn!("Login throttled for identifier '{identifier}'");
            return Err(e);
        }

        let Some(user) = self.store.find_by_username_or_email(identifier).await? else {
            self.passwords.verify_dummy(password).await;
            warn!("Login failed for identifier '{identifier}': no such user");
            return Err(invalid_credentials(identifier));
        };

        if !self.passwords.verify(password, &user.password_hash).await? {
            warn!(
                "Login failed for identifier '{identifier}': wrong password (user {})",
                user.id
            );
            return Err(invalid_credentials(identifier));
        }

        if !user.is_active {
            warn!(
                "Login refused for identifier '{identifier}': account {} is deactivated",
                user.id
            );
            return Err(AuthError::AccountDeactivated {
                user_id: user.id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let now = Utc::now();
        if let Err(e) = self.store.record_login(user.id, now).await {
            error!("Failed to record last login for user {}: {e}", user.id);
        }

        let token = self.issue_token(&user)?;
        info!("User {} ({}) logged in", user.username, user.id);

        let mut profile = user.profile();
        profile.last_login_at = Some(now);

        Ok(LoginOutcome {
            token,
            user: profile,
        })
    }

    /// Create an active Author account. Does not sign the user in.
    pub async fn register(&self, registration: Registration) -> AuthErrorResult<UserProfile> {
        let username = registration.username.trim().to_string();
        let email = registration.email.trim().to_string();
        let first_name = non_empty(registration.first_name);
        let last_name = non_empty(registration.last_name);

        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&registration.password, self.passwords.min_length())?;
        validate_name("first_name", first_name.as_deref())?;
        validate_name("last_name", last_name.as_deref())?;

        if self.store.find_by_username(&username).await?.is_some() {
            warn!("Registration rejected: username '{username}' already exists");
            return Err(duplicate(UniqueField::Username, &username, &email));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            warn!("Registration rejected: email '{email}' already exists");
            return Err(duplicate(UniqueField::Email, &username, &email));
        }

        let password_hash = self.passwords.hash(&registration.password).await?;
        let user = User::new(
            username,
            email,
            password_hash,
            first_name,
            last_name,
            Role::Author,
        );

        match self.store.create(&user).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration
            Err(StoreError::Conflict { field, .. }) => {
                warn!(
                    "Registration rejected: concurrent insert won on {field} for '{}'",
                    user.username
                );
                return Err(duplicate(field, &user.username, &user.email));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Registered user {} ({})", user.username, user.id);
        Ok(user.profile())
    }

    /// Sign an access token for `user`. Deactivated users never get one.
    #[track_caller]
    pub fn issue_token(&self, user: &User) -> AuthErrorResult<IssuedToken> {
        if !user.is_active {
            return Err(AuthError::AccountDeactivated {
                user_id: user.id,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.issuer.issue(user)
    }

    /// Validate a raw token and return the identity it asserts
    pub fn authenticate(&self, token: &str) -> AuthErrorResult<Principal> {
        let claims = self.validator.validate(token)?;
        Principal::from_claims(claims)
    }

    /// Validate an `Authorization` header value (`Bearer <token>`)
    pub fn authenticate_bearer(&self, header: Option<&str>) -> AuthErrorResult<Principal> {
        let claims = self.validator.validate_bearer(header)?;
        Principal::from_claims(claims)
    }

    /// Public profile of the token's subject
    pub async fn current_user(&self, principal: &Principal) -> AuthErrorResult<UserProfile> {
        self.store
            .find_by_id(principal.user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AuthError::InvalidToken {
                message: format!("subject {} no longer exists", principal.user_id),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AuthErrorResult<()> {
        validate_password(new_password, self.passwords.min_length())?;
        if current_password == new_password {
            return Err(AuthError::validation(
                "new_password",
                "New password must be different from current password",
            ));
        }

        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound {
                id: user_id,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !self
            .passwords
            .verify(current_password, &user.password_hash)
            .await?
        {
            warn!("Password change rejected for user {user_id}: current password mismatch");
            return Err(AuthError::validation(
                "current_password",
                "Current password is incorrect",
            ));
        }

        let password_hash = self.passwords.hash(new_password).await?;
        self.store.set_password_hash(user_id, &password_hash).await?;
        info!("Password changed for user {user_id}");

        Ok(())
    }

    /// Issue a reset ticket for the account registered under `email`.
    ///
    /// Returns `None` for unknown or deactivated accounts; callers must answer
    /// the same way in both cases.
    pub async fn forgot_password(
        &self,
        email: &str,
    ) -> AuthErrorResult<Option<PasswordResetTicket>> {
        let email = email.trim();

        match self.store.find_by_email(email).await? {
            Some(user) if user.is_active => {
                let ticket = self.resets.issue(&user)?;
                info!("Password reset ticket issued for user {}", user.id);
                Ok(Some(ticket))
            }
            Some(user) => {
                warn!("Password reset requested for deactivated user {}", user.id);
                Ok(None)
            }
            None => {
                debug!("Password reset requested for unknown email '{email}'");
                Ok(None)
            }
        }
    }

    /// Overwrite the password after verifying a ticket from [`Self::forgot_password`]
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> AuthErrorResult<()> {
        validate_password(new_password, self.passwords.min_length())?;

        let Some(user) = self.store.find_by_email(email.trim()).await? else {
            warn!("Password reset failed: unknown email '{}'", email.trim());
            return Err(AuthError::InvalidResetToken {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.resets.verify(&user, token).inspect_err(|_| {
            warn!("Password reset failed for user {}: bad ticket", user.id);
        })?;

        let password_hash = self.passwords.hash(new_password).await?;
        self.store.set_password_hash(user.id, &password_hash).await?;
        info!("Password reset completed for user {}", user.id);

        Ok(())
    }
}

#[track_caller]
fn invalid_credentials(identifier: &str) -> AuthError {
    AuthError::InvalidCredentials {
        identifier: identifier.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn duplicate(field: UniqueField, username: &str, email: &str) -> AuthError {
    let location = ErrorLocation::from(Location::caller());
    match field {
        UniqueField::Username => AuthError::DuplicateUsername {
            username: username.to_string(),
            location,
        },
        UniqueField::Email => AuthError::DuplicateEmail {
            email: email.to_string(),
            location,
        },
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
