use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{info, warn};

use crate::config::AppConfig;

/// How long a writer waits for the database lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .context("parse DATABASE_URL")?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);
    let db = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Applies the embedded schema. Safe to run on every startup.
pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

/// Makes sure the configured telegram identity owns an admin account.
/// An existing user with that identity keeps its role.
pub async fn ensure_admin(db: &SqlitePool, telegram_id: &str, now: &str) -> anyhow::Result<i64> {
    sqlx::query(
        r#"
        INSERT INTO users (telegram_id, role, created_at, updated_at)
        VALUES ($1, 'admin', $2, $2)
        ON CONFLICT (telegram_id) DO NOTHING
        "#,
    )
    .bind(telegram_id)
    .bind(now)
    .execute(db)
    .await
    .context("insert admin user")?;

    let (id, role): (i64, String) =
        sqlx::query_as(r#"SELECT id, role FROM users WHERE telegram_id = $1"#)
            .bind(telegram_id)
            .fetch_one(db)
            .await
            .context("load admin user")?;
    if role != "admin" {
        warn!(user_id = id, %role, "configured admin identity belongs to a non-admin user");
    } else {
        info!(user_id = id, "admin account ready");
    }
    Ok(id)
}

#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    // a single connection keeps every query on the same in-memory database
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("memory url")
        .foreign_keys(true);
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("memory pool");
    migrate(&db).await.expect("migrations apply");
    db
}

/// File-backed pool for tests that need several real connections.
/// The directory must outlive the pool.
#[cfg(test)]
pub async fn file_pool(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
    let config = AppConfig {
        database_url: format!("sqlite://{}", dir.path().join("fitcoach.db").display()),
        max_connections,
        admin_telegram_id: None,
    };
    let db = connect(&config).await.expect("file pool");
    migrate(&db).await.expect("migrations apply");
    db
}
