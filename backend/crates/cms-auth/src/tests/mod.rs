
use crate::{PasswordConfig, SigningKey, TokenConfig};

use cms_core::{Role, User};

pub(crate) const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

pub(crate) fn test_token_config() -> TokenConfig {
    TokenConfig::new(SigningKey::Configured(TEST_SECRET.as_bytes().to_vec()))
}

/// Cheap Argon2 parameters so tests do not spend seconds hashing
pub(crate) fn fast_password_config() -> PasswordConfig {
    PasswordConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
        min_length: 8,
    }
}

pub(crate) fn test_user(role: Role) -> User {
    User::new(
        "alice".to_string(),
        "alice@x.com".to_string(),
        "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        Some("Alice".to_string()),
        Some("A".to_string()),
        role,
    )
}
