use chrono::NaiveDate;
use uuid::Uuid;

use crate::daily_log::bucket;
use crate::daily_log::model::{DailyLog, Meals};
use crate::error::{AppError, Result};
use crate::state::AppState;

fn resolve_day(state: &AppState, date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => bucket::parse_day(raw),
        None => Ok(bucket::today(state.config.reference_timezone)),
    }
}

/// The stored log for the requested local day, or a synthesized default with
/// all six slots empty. The default is never persisted and carries a nil id;
/// absence of a log is a normal state, not an error.
pub async fn find_or_default(
    state: &AppState,
    user_id: Uuid,
    date: Option<&str>,
) -> Result<DailyLog> {
    let day = resolve_day(state, date)?;
    let range = bucket::day_range(state.config.reference_timezone, day);
    let found = state.daily_logs.find_in_range(user_id, range).await?;
    Ok(found.unwrap_or_else(|| DailyLog {
        id: Uuid::nil(),
        user_id,
        logged_at: range.0,
        body_weight_of_day: None,
        meals: Meals::empty(),
    }))
}

/// Idempotent create: at most one log per user per local calendar day.
/// A second create for the same day is a Conflict, never an upsert.
pub async fn create_log(
    state: &AppState,
    user_id: Uuid,
    date: Option<&str>,
    body_weight_of_day: Option<f64>,
    meals: Meals,
) -> Result<DailyLog> {
    validate_weight(body_weight_of_day)?;
    let day = resolve_day(state, date)?;
    let range = bucket::day_range(state.config.reference_timezone, day);

    if state
        .daily_logs
        .find_in_range(user_id, range)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "a daily log already exists for {day}"
        )));
    }

    let log = state
        .daily_logs
        .insert(user_id, range.0, body_weight_of_day, meals)
        .await?;
    Ok(log)
}

/// A single log by id, visible only to its owner.
pub async fn get_log(state: &AppState, user_id: Uuid, log_id: Uuid) -> Result<DailyLog> {
    state
        .daily_logs
        .find_by_id(log_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("daily log {log_id}")))
}

/// Updates weight and/or replaces meals wholesale on an existing log.
/// `Some(None)` for the weight clears it; `None` leaves it unchanged.
pub async fn update_log(
    state: &AppState,
    user_id: Uuid,
    log_id: Uuid,
    body_weight_of_day: Option<Option<f64>>,
    meals: Option<Meals>,
) -> Result<DailyLog> {
    validate_weight(body_weight_of_day.flatten())?;
    state
        .daily_logs
        .update(log_id, user_id, body_weight_of_day, meals)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("daily log {log_id}")))
}

pub async fn list_logs(state: &AppState, user_id: Uuid) -> Result<Vec<DailyLog>> {
    Ok(state.daily_logs.list_by_user(user_id).await?)
}

fn validate_weight(weight: Option<f64>) -> Result<()> {
    match weight {
        Some(w) if w <= 0.0 => Err(AppError::Validation(
            "bodyWeightOfDay must be a positive number".into(),
        )),
        _ => Ok(()),
    }
}
