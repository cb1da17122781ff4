use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::nutrition::profile::NutrientProfile;

/// Read side of the user record the core depends on: the stored daily target.
/// `Ok(None)` means the user does not exist; callers surface that as NotFound.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_target(&self, user_id: Uuid) -> anyhow::Result<Option<NutrientProfile>>;
}

#[derive(Debug, FromRow)]
struct TargetRow {
    target_calories: f64,
    target_protein: f64,
    target_carbs: f64,
    target_fat: f64,
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_target(&self, user_id: Uuid) -> anyhow::Result<Option<NutrientProfile>> {
        let row = sqlx::query_as::<_, TargetRow>(
            r#"
            SELECT target_calories, target_protein, target_carbs, target_fat
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(|r| {
            NutrientProfile::new(r.target_calories, r.target_protein, r.target_carbs, r.target_fat)
        }))
    }
}
