use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::state::AppState;
use crate::weight::dto::{AverageResponse, RangeQuery, WeekComparison, WeeklyAverage, WeightPoint};
use crate::weight::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weight/history", get(get_history))
        .route("/weight/average", get(get_average))
        .route("/weight/weekly", get(get_weekly_averages))
        .route("/weight/comparison", get(get_week_comparison))
}

#[instrument(skip(state))]
async fn get_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WeightPoint>>> {
    Ok(Json(services::history(&state, user_id).await?))
}

#[instrument(skip(state))]
async fn get_average(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RangeQuery>,
) -> Result<Json<AverageResponse>> {
    let avg =
        services::average_in_range(&state, user_id, q.start.as_deref(), q.end.as_deref()).await?;
    Ok(Json(avg))
}

#[instrument(skip(state))]
async fn get_weekly_averages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WeeklyAverage>>> {
    Ok(Json(services::weekly_averages(&state, user_id).await?))
}

#[instrument(skip(state))]
async fn get_week_comparison(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<WeekComparison>> {
    Ok(Json(services::week_comparison(&state, user_id).await?))
}
