pub mod bearer_user;
pub mod session_user;
