use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::nutrition::dto::{DateQuery, ResolveTargetsRequest, SummaryResponse};
use crate::nutrition::profile::NutrientProfile;
use crate::nutrition::services::compute_summary;
use crate::nutrition::targets::apply_target_update;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/targets/resolve", post(post_resolve_targets))
}

#[instrument(skip(state))]
async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<SummaryResponse>> {
    let summary = compute_summary(&state, user_id, q.date.as_deref()).await?;
    Ok(Json(summary))
}

/// Resolves the daily targets a body profile maps to, without touching
/// stored state. The profile-edit flow calls this to decide what to store:
/// an explicit override wins verbatim, otherwise the targets are recomputed.
#[instrument(skip(payload))]
async fn post_resolve_targets(
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<ResolveTargetsRequest>,
) -> Json<NutrientProfile> {
    Json(apply_target_update(&payload.profile, payload.override_target))
}
