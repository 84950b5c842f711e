pub mod account_service;
pub mod authenticator;
pub mod authorizer;
pub mod claims;
pub mod error;
pub mod jwt_issuer;
pub mod jwt_validator;
pub mod login_rate_limiter;
pub mod password_reset;
pub mod password_verifier;
pub mod principal;
pub mod rate_limit_config;
pub mod signing_key;
pub mod token_config;

pub use account_service::{AccountService, ProfileUpdate};
pub use authenticator::{AuthSettings, Authenticator, LoginOutcome, Registration};
pub use authorizer::{AccessPolicy, Authorizer};
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_issuer::{IssuedToken, JwtIssuer};
pub use jwt_validator::JwtValidator;
pub use login_rate_limiter::LoginRateLimiter;
pub use password_reset::{PasswordResetTicket, ResetTicketIssuer};
pub use password_verifier::{PasswordConfig, PasswordVerifier};
pub use principal::Principal;
pub use rate_limit_config::RateLimitConfig;
pub use signing_key::{DEVELOPMENT_SECRET, MIN_SECRET_LENGTH, SigningKey};
pub use token_config::TokenConfig;

#[cfg(test)]
mod tests;
