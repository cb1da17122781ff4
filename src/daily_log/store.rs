use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::daily_log::model::{DailyLog, Meals};

/// A weight sample extracted from a log with a non-null body weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSample {
    pub logged_at: DateTime<Utc>,
    pub weight: f64,
}

/// Daily log persistence, keyed by user and absolute-instant range. Range
/// construction belongs to the bucketing policy, not the store.
#[async_trait]
pub trait DailyLogStore: Send + Sync {
    async fn find_in_range(
        &self,
        user_id: Uuid,
        range: (DateTime<Utc>, DateTime<Utc>),
    ) -> anyhow::Result<Option<DailyLog>>;

    /// Returns `None` when the log does not exist or belongs to another user.
    async fn find_by_id(&self, log_id: Uuid, user_id: Uuid) -> anyhow::Result<Option<DailyLog>>;

    async fn insert(
        &self,
        user_id: Uuid,
        logged_at: DateTime<Utc>,
        body_weight_of_day: Option<f64>,
        meals: Meals,
    ) -> anyhow::Result<DailyLog>;

    /// Replaces weight and/or meals wholesale. The outer `Option` on weight
    /// distinguishes "leave unchanged" from `Some(None)`, which clears the
    /// stored weight. Returns `None` when the log does not exist or belongs
    /// to another user.
    async fn update(
        &self,
        log_id: Uuid,
        user_id: Uuid,
        body_weight_of_day: Option<Option<f64>>,
        meals: Option<Meals>,
    ) -> anyhow::Result<Option<DailyLog>>;

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<DailyLog>>;

    /// All samples with a non-null weight, ascending by instant.
    async fn weight_samples(&self, user_id: Uuid) -> anyhow::Result<Vec<WeightSample>>;
}

#[derive(Debug, FromRow)]
struct DailyLogRow {
    id: Uuid,
    user_id: Uuid,
    logged_at: DateTime<Utc>,
    body_weight_of_day: Option<f64>,
    meals: sqlx::types::Json<Meals>,
}

impl From<DailyLogRow> for DailyLog {
    fn from(r: DailyLogRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            logged_at: r.logged_at,
            body_weight_of_day: r.body_weight_of_day,
            meals: r.meals.0,
        }
    }
}

#[derive(Clone)]
pub struct PgDailyLogStore {
    db: PgPool,
}

impl PgDailyLogStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DailyLogStore for PgDailyLogStore {
    async fn find_in_range(
        &self,
        user_id: Uuid,
        range: (DateTime<Utc>, DateTime<Utc>),
    ) -> anyhow::Result<Option<DailyLog>> {
        let row = sqlx::query_as::<_, DailyLogRow>(
            r#"
            SELECT id, user_id, logged_at, body_weight_of_day, meals
            FROM daily_logs
            WHERE user_id = $1 AND logged_at BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(range.0)
        .bind(range.1)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(DailyLog::from))
    }

    async fn find_by_id(&self, log_id: Uuid, user_id: Uuid) -> anyhow::Result<Option<DailyLog>> {
        let row = sqlx::query_as::<_, DailyLogRow>(
            r#"
            SELECT id, user_id, logged_at, body_weight_of_day, meals
            FROM daily_logs
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(log_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(DailyLog::from))
    }

    async fn insert(
        &self,
        user_id: Uuid,
        logged_at: DateTime<Utc>,
        body_weight_of_day: Option<f64>,
        meals: Meals,
    ) -> anyhow::Result<DailyLog> {
        let row = sqlx::query_as::<_, DailyLogRow>(
            r#"
            INSERT INTO daily_logs (id, user_id, logged_at, body_weight_of_day, meals)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, logged_at, body_weight_of_day, meals
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(logged_at)
        .bind(body_weight_of_day)
        .bind(sqlx::types::Json(meals))
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn update(
        &self,
        log_id: Uuid,
        user_id: Uuid,
        body_weight_of_day: Option<Option<f64>>,
        meals: Option<Meals>,
    ) -> anyhow::Result<Option<DailyLog>> {
        // COALESCE cannot express "set to null", so the weight takes a
        // separate set/keep flag alongside the nullable value.
        let row = sqlx::query_as::<_, DailyLogRow>(
            r#"
            UPDATE daily_logs
            SET body_weight_of_day = CASE WHEN $3 THEN $4 ELSE body_weight_of_day END,
                meals = COALESCE($5, meals)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, logged_at, body_weight_of_day, meals
            "#,
        )
        .bind(log_id)
        .bind(user_id)
        .bind(body_weight_of_day.is_some())
        .bind(body_weight_of_day.flatten())
        .bind(meals.map(sqlx::types::Json))
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(DailyLog::from))
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<DailyLog>> {
        let rows = sqlx::query_as::<_, DailyLogRow>(
            r#"
            SELECT id, user_id, logged_at, body_weight_of_day, meals
            FROM daily_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(DailyLog::from).collect())
    }

    async fn weight_samples(&self, user_id: Uuid) -> anyhow::Result<Vec<WeightSample>> {
        let rows: Vec<(DateTime<Utc>, f64)> = sqlx::query_as(
            r#"
            SELECT logged_at, body_weight_of_day
            FROM daily_logs
            WHERE user_id = $1 AND body_weight_of_day IS NOT NULL
            ORDER BY logged_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(logged_at, weight)| WeightSample { logged_at, weight })
            .collect())
    }
}
