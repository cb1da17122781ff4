pub mod bucket;
pub mod dto;
pub mod handlers;
pub mod model;
pub mod services;
pub mod store;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
