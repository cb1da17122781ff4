use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::daily_log::bucket;
use crate::error::{AppError, Result};
use crate::nutrition::aggregate::{compute_consumed, referenced_ids};
use crate::nutrition::dto::SummaryResponse;
use crate::nutrition::profile::NutrientProfile;
use crate::state::AppState;

/// Resolves the requested day, fetches the log and the user's target
/// concurrently, then aggregates whatever the log references.
///
/// A missing log is a normal state: consumed is all-zero and the difference
/// equals the full target. A missing user is the only hard failure here.
pub async fn compute_summary(
    state: &AppState,
    user_id: Uuid,
    date: Option<&str>,
) -> Result<SummaryResponse> {
    let day = resolve_day(state, date)?;
    let range = bucket::day_range(state.config.reference_timezone, day);

    let (log, target) = tokio::join!(
        state.daily_logs.find_in_range(user_id, range),
        state.users.get_target(user_id),
    );
    let target = target?.ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

    let consumed = match log? {
        Some(log) => {
            let (product_ids, recipe_ids) = referenced_ids(&log.meals);
            let (products, recipes) = tokio::join!(
                state.facts.get_products(&product_ids),
                state.facts.get_recipes(&recipe_ids),
            );
            let products: HashMap<_, _> = products?.into_iter().map(|p| (p.id, p)).collect();
            let recipes: HashMap<_, _> = recipes?.into_iter().map(|r| (r.id, r)).collect();
            compute_consumed(&log.meals, &products, &recipes)
        }
        None => NutrientProfile::ZERO,
    };

    Ok(SummaryResponse {
        date: day,
        difference: target - consumed,
        consumed,
        target,
    })
}

fn resolve_day(state: &AppState, date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => bucket::parse_day(raw),
        None => Ok(bucket::today(state.config.reference_timezone)),
    }
}
