pub mod aggregate;
pub mod dto;
pub mod handlers;
pub mod profile;
pub mod services;
pub mod targets;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
