use cms_core::{Role, User};

/// Creates a test User; the hash is a placeholder, repositories never inspect it
pub fn create_test_user(username: &str, email: &str) -> User {
    User::new(
        username.to_string(),
        email.to_string(),
        "$argon2id$v=19$m=8,t=1,p=1$dGVzdHNhbHQ$dGVzdGhhc2g".to_string(),
        Some("Test".to_string()),
        Some("User".to_string()),
        Role::Author,
    )
}
