//! User repository backing the credential store.
//!
//! Username and email columns are `COLLATE NOCASE` with UNIQUE constraints,
//! so lookups are case-insensitive and concurrent inserts of the same name
//! have exactly one winner. The loser surfaces as
//! [`DbError::UniqueViolation`].

use crate::{DbError, Result as DbErrorResult};

use cms_core::{CredentialStore, Role, StoreResult, User};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, username, email, password_hash, first_name, last_name,
        role, is_active, created_at, last_login_at
    FROM cms_users
"#;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let id = user.id.to_string();
        let role = user.role.as_str();
        let created_at = user.created_at.timestamp();
        let last_login_at = user.last_login_at.map(|dt| dt.timestamp());

        sqlx::query(
            r#"
                INSERT INTO cms_users (
                    id, username, email, password_hash, first_name, last_name,
                    role, is_active, created_at, last_login_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(role)
        .bind(user.is_active)
        .bind(created_at)
        .bind(last_login_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> DbErrorResult<()> {
        let result = sqlx::query("UPDATE cms_users SET last_login_at = ? WHERE id = ?")
            .bind(at.timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        ensure_found(result, id)
    }

    pub async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> DbErrorResult<()> {
        let result = sqlx::query("UPDATE cms_users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        ensure_found(result, id)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> DbErrorResult<()> {
        let result = sqlx::query("UPDATE cms_users SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        ensure_found(result, id)
    }

    pub async fn set_role(&self, id: Uuid, role: Role) -> DbErrorResult<()> {
        let result = sqlx::query("UPDATE cms_users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        ensure_found(result, id)
    }

    /// Only the names that are `Some` are written
    pub async fn update_names(
        &self,
        id: Uuid,
        first_name: Option<Option<String>>,
        last_name: Option<Option<String>>,
    ) -> DbErrorResult<()> {
        let result = sqlx::query(
            r#"
                UPDATE cms_users
                SET first_name = CASE WHEN ? THEN ? ELSE first_name END,
                    last_name = CASE WHEN ? THEN ? ELSE last_name END
                WHERE id = ?
            "#,
        )
        .bind(first_name.is_some())
        .bind(first_name.flatten())
        .bind(last_name.is_some())
        .bind(last_name.flatten())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        ensure_found(result, id)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let id_str = id.to_string();

        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id_str)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// Username wins when one account's username equals another's email
    pub async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE username = ?1 OR email = ?1 \
             ORDER BY CASE WHEN username = ?1 THEN 0 ELSE 1 END LIMIT 1"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY created_at, username"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row).collect()
    }
}

#[track_caller]
fn ensure_found(result: SqliteQueryResult, id: Uuid) -> DbErrorResult<()> {
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[track_caller]
fn corrupt(message: String) -> DbError {
    DbError::Initialization {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

fn map_row(r: &SqliteRow) -> DbErrorResult<User> {
    let id: String = r.try_get("id")?;
    let role: String = r.try_get("role")?;
    let created_at: i64 = r.try_get("created_at")?;
    let last_login_at: Option<i64> = r.try_get("last_login_at")?;

    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| corrupt(format!("Invalid UUID in cms_users.id: {e}")))?,
        username: r.try_get("username")?,
        email: r.try_get("email")?,
        password_hash: r.try_get("password_hash")?,
        first_name: r.try_get("first_name")?,
        last_name: r.try_get("last_name")?,
        role: Role::from_str(&role)
            .map_err(|e| corrupt(format!("Invalid role in cms_users.role: {e}")))?,
        is_active: r.try_get("is_active")?,
        created_at: timestamp(created_at, "created_at")?,
        last_login_at: last_login_at
            .map(|ts| timestamp(ts, "last_login_at"))
            .transpose()?,
    })
}

fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| corrupt(format!("Invalid timestamp in cms_users.{column}")))
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_username_or_email(&self, identifier: &str) -> StoreResult<Option<User>> {
        Ok(UserRepository::find_by_username_or_email(self, identifier).await?)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepository::find_by_username(self, username).await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepository::find_by_email(self, email).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(UserRepository::find_by_id(self, id).await?)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.find_all().await?)
    }

    async fn create(&self, user: &User) -> StoreResult<()> {
        Ok(UserRepository::create(self, user).await?)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        Ok(UserRepository::record_login(self, id, at).await?)
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> StoreResult<()> {
        Ok(UserRepository::set_password_hash(self, id, password_hash).await?)
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> StoreResult<()> {
        Ok(UserRepository::set_active(self, id, is_active).await?)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<()> {
        Ok(UserRepository::set_role(self, id, role).await?)
    }

    async fn update_names(
        &self,
        id: Uuid,
        first_name: Option<Option<String>>,
        last_name: Option<Option<String>>,
    ) -> StoreResult<()> {
        Ok(UserRepository::update_names(self, id, first_name, last_name).await?)
    }
}
