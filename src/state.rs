use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        db::migrate(&db).await?;

        let clock = Arc::new(SystemClock) as Arc<dyn Clock>;
        if let Some(telegram_id) = &config.admin_telegram_id {
            db::ensure_admin(&db, telegram_id, &clock.now()).await?;
        }

        Ok(Self::from_parts(db, config, clock))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { db, config, clock }
    }

    /// In-memory store with the schema applied and a frozen clock.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        use crate::clock::FixedClock;

        let db = db::memory_pool().await;
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            admin_telegram_id: None,
        });
        let clock = Arc::new(FixedClock("2025-01-01T00:00:00Z".into())) as Arc<dyn Clock>;
        Self::from_parts(db, config, clock)
    }
}
