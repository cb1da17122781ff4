use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::daily_log::dto::{CreateLogRequest, DateQuery, UpdateLogRequest};
use crate::daily_log::model::DailyLog;
use crate::daily_log::services;
use crate::error::Result;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily-log", get(get_daily_log).post(create_daily_log))
        .route("/daily-log/:id", get(get_daily_log_by_id).put(update_daily_log))
        .route("/daily-logs", get(list_daily_logs))
}

#[instrument(skip(state))]
async fn get_daily_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<DailyLog>> {
    let log = services::find_or_default(&state, user_id, q.date.as_deref()).await?;
    Ok(Json(log))
}

#[instrument(skip(state, payload))]
async fn create_daily_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<DailyLog>)> {
    let log = services::create_log(
        &state,
        user_id,
        payload.date.as_deref(),
        payload.body_weight_of_day,
        payload.meals,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[instrument(skip(state))]
async fn get_daily_log_by_id(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DailyLog>> {
    let log = services::get_log(&state, user_id, id).await?;
    Ok(Json(log))
}

#[instrument(skip(state, payload))]
async fn update_daily_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLogRequest>,
) -> Result<Json<DailyLog>> {
    let log = services::update_log(
        &state,
        user_id,
        id,
        payload.body_weight_of_day,
        payload.meals,
    )
    .await?;
    Ok(Json(log))
}

#[instrument(skip(state))]
async fn list_daily_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<DailyLog>>> {
    let logs = services::list_logs(&state, user_id).await?;
    Ok(Json(logs))
}
