pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::user_repository::UserRepository;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;

/// Embedded schema migrations for the credential store
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Round-trip a trivial query; used by readiness probes
pub async fn ping(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
