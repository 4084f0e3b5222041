use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/toggle/:id", post(handlers::toggle_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/input", post(handlers::input))
        .with_state(state)
}
