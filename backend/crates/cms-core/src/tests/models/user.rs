use crate::{Role, User, UserProfile};

use googletest::prelude::*;
use uuid::Uuid;

fn author() -> User {
    User::new(
        "alice".to_string(),
        "alice@x.com".to_string(),
        "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        Some("Alice".to_string()),
        Some("A".to_string()),
        Role::Author,
    )
}

#[test]
fn given_new_user_then_active_and_never_logged_in() {
    let user = author();

    assert_that!(user.is_active, eq(true));
    assert_that!(user.last_login_at, none());
    assert_that!(user.role, eq(Role::Author));
}

#[test]
fn given_owner_when_checking_can_act_on_then_allowed() {
    let user = author();

    assert_that!(user.can_act_on(user.id), eq(true));
    assert_that!(user.can_act_on(Uuid::new_v4()), eq(false));
}

#[test]
fn given_admin_when_checking_can_act_on_foreign_resource_then_allowed() {
    let mut user = author();
    user.role = Role::Admin;

    assert_that!(user.can_act_on(Uuid::new_v4()), eq(true));
}

#[test]
fn given_user_when_debug_formatted_then_hash_is_redacted() {
    let user = author();
    let debug = format!("{user:?}");

    assert_that!(debug, contains_substring("<redacted>"));
    assert_that!(debug, not(contains_substring("argon2id")));
}

#[test]
fn given_user_when_converted_to_profile_then_no_hash_is_serialized() {
    let user = author();
    let profile = UserProfile::from(&user);
    let json = serde_json::to_value(&profile).unwrap();

    assert_that!(json.get("password_hash"), none());
    assert_that!(json["username"], eq(&serde_json::json!("alice")));
    assert_that!(json["role"], eq(&serde_json::json!("Author")));
}
