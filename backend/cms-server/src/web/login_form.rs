use serde::Deserialize;

/// `application/x-www-form-urlencoded` body of the sign-in page
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(alias = "username", alias = "email")]
    pub identifier: String,
    pub password: String,
}
