use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    /// Ticket delivered out of band after `forgot-password`
    pub token: String,
    pub new_password: String,
}
