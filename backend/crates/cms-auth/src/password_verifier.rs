//! Argon2id password hashing.
//!
//! Hashing and verification are CPU-bound and run on the blocking pool so a
//! burst of logins cannot stall the async runtime.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use error_location::ErrorLocation;
use tokio::task;

/// Argon2 cost parameters
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
            min_length: 8,
        }
    }
}

#[derive(Clone)]
pub struct PasswordVerifier {
    argon2: Argon2<'static>,
    min_length: usize,
    /// Verified against when an identifier matches no user
    dummy_hash: String,
}

impl PasswordVerifier {
    #[track_caller]
    pub fn new(config: &PasswordConfig) -> AuthErrorResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AuthError::Configuration {
                message: format!("Invalid Argon2 params: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, "timing-equalization-placeholder")?;

        Ok(Self {
            argon2,
            min_length: config.min_length,
            dummy_hash,
        })
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Produce a salted PHC string for `password`
    pub async fn hash(&self, password: &str) -> AuthErrorResult<String> {
        let argon2 = self.argon2.clone();
        let password = password.to_string();

        task::spawn_blocking(move || hash_with(&argon2, &password))
            .await
            .map_err(|e| AuthError::PasswordHash {
                message: format!("Password hashing task panicked: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?
    }

    /// Constant-time comparison of `password` against a stored PHC string
    pub async fn verify(&self, password: &str, password_hash: &str) -> AuthErrorResult<bool> {
        let argon2 = self.argon2.clone();
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash).map_err(|e| AuthError::PasswordHash {
                message: format!("Invalid password hash format: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
            Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| AuthError::PasswordHash {
            message: format!("Password verification task panicked: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?
    }

    /// Burn the same work as a real verification; result is discarded
    pub async fn verify_dummy(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_hash).await;
    }
}

#[track_caller]
fn hash_with(argon2: &Argon2<'_>, password: &str) -> AuthErrorResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash {
            message: format!("Failed to hash password: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
