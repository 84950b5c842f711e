mod common;

use common::{create_test_pool, create_test_user};

use cms_core::{CredentialStore, Role, StoreError, UniqueField};
use cms_db::{DbError, UserRepository};

use chrono::{Timelike, Utc};
use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_valid_user_when_created_then_can_be_found_by_id() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let user = create_test_user("alice", "alice@x.com");

    // When
    repo.create(&user).await.unwrap();

    // Then
    let found = repo.find_by_id(user.id).await.unwrap();
    assert_that!(found, some(anything()));
    let found = found.unwrap();
    assert_that!(found.id, eq(user.id));
    assert_that!(found.username, eq("alice"));
    assert_that!(found.email, eq("alice@x.com"));
    assert_that!(found.role, eq(Role::Author));
    assert_that!(found.is_active, eq(true));
    assert_that!(found.password_hash, eq(&user.password_hash));
    assert_that!(found.last_login_at, none());
}

#[tokio::test]
async fn given_user_when_finding_by_username_or_email_then_both_resolve_same_user() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let user = create_test_user("alice", "alice@x.com");
    repo.create(&user).await.unwrap();

    // When
    let by_username = repo.find_by_username_or_email("alice").await.unwrap();
    let by_email = repo.find_by_username_or_email("alice@x.com").await.unwrap();

    // Then
    assert_that!(by_username.map(|u| u.id), some(eq(user.id)));
    assert_that!(by_email.map(|u| u.id), some(eq(user.id)));
}

#[tokio::test]
async fn given_user_when_looking_up_with_different_case_then_found() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let user = create_test_user("alice", "alice@x.com");
    repo.create(&user).await.unwrap();

    // When
    let found = repo.find_by_username_or_email("ALICE@X.COM").await.unwrap();

    // Then
    assert_that!(found.map(|u| u.id), some(eq(user.id)));
}

#[tokio::test]
async fn given_empty_database_when_finding_then_returns_none() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    assert_that!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), none());
    assert_that!(repo.find_by_username("ghost").await.unwrap(), none());
    assert_that!(repo.find_by_email("ghost@x.com").await.unwrap(), none());
    assert_that!(
        repo.find_by_username_or_email("ghost").await.unwrap(),
        none()
    );
}

#[tokio::test]
async fn given_existing_username_when_creating_duplicate_then_unique_violation_on_username() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    repo.create(&create_test_user("alice", "alice@x.com"))
        .await
        .unwrap();

    // When
    let result = repo
        .create(&create_test_user("Alice", "other@x.com"))
        .await;

    // Then
    assert!(matches!(
        result,
        Err(DbError::UniqueViolation {
            field: UniqueField::Username,
            ..
        })
    ));
    assert_that!(repo.find_all().await.unwrap().len(), eq(1));
}

#[tokio::test]
async fn given_existing_email_when_creating_duplicate_then_store_reports_email_conflict() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    repo.create(&create_test_user("alice", "alice@x.com"))
        .await
        .unwrap();

    // When: going through the trait object, as the authenticator does
    let store: &dyn CredentialStore = &repo;
    let result = store.create(&create_test_user("bob", "alice@x.com")).await;

    // Then
    assert!(matches!(
        result,
        Err(StoreError::Conflict {
            field: UniqueField::Email,
            ..
        })
    ));
}

#[tokio::test]
async fn given_user_when_login_recorded_then_only_last_login_changes() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let user = create_test_user("alice", "alice@x.com");
    repo.create(&user).await.unwrap();
    repo.set_active(user.id, false).await.unwrap();

    // When
    let login_time = Utc::now().with_nanosecond(0).unwrap();
    repo.record_login(user.id, login_time).await.unwrap();

    // Then
    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_that!(found.last_login_at, some(eq(login_time)));
    assert_that!(found.is_active, eq(false));
    assert_that!(found.password_hash, eq(&user.password_hash));
}

#[tokio::test]
async fn given_user_when_columns_set_then_each_write_persists() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let user = create_test_user("alice", "alice@x.com");
    repo.create(&user).await.unwrap();

    // When
    repo.set_role(user.id, Role::Editor).await.unwrap();
    repo.set_password_hash(user.id, "$argon2id$new").await.unwrap();
    repo.set_active(user.id, false).await.unwrap();

    // Then
    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_that!(found.role, eq(Role::Editor));
    assert_that!(found.password_hash.as_str(), eq("$argon2id$new"));
    assert_that!(found.is_active, eq(false));
    assert_that!(found.first_name.as_deref(), some(eq("Test")));
}

#[tokio::test]
async fn given_user_when_names_updated_then_absent_names_untouched() {
    // Given
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    let user = create_test_user("alice", "alice@x.com");
    repo.create(&user).await.unwrap();

    // When
    repo.update_names(user.id, Some(Some("Alice".to_string())), None)
        .await
        .unwrap();
    let renamed = repo.find_by_id(user.id).await.unwrap().unwrap();
    repo.update_names(user.id, None, Some(None)).await.unwrap();
    let cleared = repo.find_by_id(user.id).await.unwrap().unwrap();

    // Then
    assert_that!(renamed.first_name.as_deref(), some(eq("Alice")));
    assert_that!(renamed.last_name.as_deref(), some(eq("User")));
    assert_that!(cleared.first_name.as_deref(), some(eq("Alice")));
    assert_that!(cleared.last_name, none());
}

#[tokio::test]
async fn given_unknown_user_when_column_written_then_not_found() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);

    let result = repo.set_active(Uuid::new_v4(), false).await;
    let login = repo.record_login(Uuid::new_v4(), Utc::now()).await;

    assert!(matches!(result, Err(DbError::NotFound { .. })));
    assert!(matches!(login, Err(DbError::NotFound { .. })));
}

#[tokio::test]
async fn given_several_users_when_listing_then_all_returned() {
    let pool = create_test_pool().await;
    let repo = UserRepository::new(pool);
    repo.create(&create_test_user("alice", "alice@x.com"))
        .await
        .unwrap();
    repo.create(&create_test_user("bob", "bob@x.com"))
        .await
        .unwrap();

    let users = CredentialStore::list(&repo).await.unwrap();

    assert_that!(users.len(), eq(2));
}
