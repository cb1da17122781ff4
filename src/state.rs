use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::catalog::{NutrientFactsStore, PgNutrientFactsStore};
use crate::config::AppConfig;
use crate::daily_log::store::{DailyLogStore, PgDailyLogStore};
use crate::users::{PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub facts: Arc<dyn NutrientFactsStore>,
    pub daily_logs: Arc<dyn DailyLogStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_pool(db, config))
    }

    pub fn from_pool(db: PgPool, config: Arc<AppConfig>) -> Self {
        Self {
            facts: Arc::new(PgNutrientFactsStore::new(db.clone())),
            daily_logs: Arc::new(PgDailyLogStore::new(db.clone())),
            users: Arc::new(PgUserStore::new(db.clone())),
            db,
            config,
        }
    }

    /// Assemble a state from explicit parts; tests use this with in-memory
    /// stores and a lazily connecting pool.
    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        facts: Arc<dyn NutrientFactsStore>,
        daily_logs: Arc<dyn DailyLogStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            db,
            config,
            facts,
            daily_logs,
            users,
        }
    }
}
