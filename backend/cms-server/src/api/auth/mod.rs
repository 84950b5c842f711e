#[allow(clippy::module_inception)]
pub mod auth;
pub mod change_password_request;
pub mod forgot_password_request;
pub mod login_request;
pub mod login_response;
pub mod message_response;
pub mod register_request;
pub mod reset_password_request;
