use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email
    #[serde(alias = "username", alias = "email")]
    pub identifier: String,
    pub password: String,
}
