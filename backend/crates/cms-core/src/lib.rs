pub mod credential_store;
pub mod error;
pub mod models;
pub mod validation;

pub use credential_store::CredentialStore;
pub use error::{CoreError, Result, StoreError, StoreResult, UniqueField};
pub use models::role::Role;
pub use models::user::User;
pub use models::user_profile::UserProfile;

#[cfg(test)]
mod tests;
