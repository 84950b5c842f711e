pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod settings;
pub mod web;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{change_password, forgot_password, login, me, register, reset_password},
        change_password_request::ChangePasswordRequest,
        forgot_password_request::ForgotPasswordRequest,
        login_request::LoginRequest,
        login_response::LoginResponse,
        message_response::MessageResponse,
        register_request::RegisterRequest,
        reset_password_request::ResetPasswordRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::{bearer_user::BearerUser, session_user::SessionUser},
    users::{
        set_active_request::SetActiveRequest,
        update_profile_request::UpdateProfileRequest,
        user_list_response::UserListResponse,
        users::{get_user, list_users, set_user_active, update_user_profile},
    },
};
pub use app_state::AppState;
pub use routes::build_router;
pub use settings::auth_settings;
