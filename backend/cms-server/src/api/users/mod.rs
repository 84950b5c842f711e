pub mod set_active_request;
pub mod update_profile_request;
pub mod user_list_response;
#[allow(clippy::module_inception)]
pub mod users;
