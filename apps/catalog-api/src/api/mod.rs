//! API routes module

pub mod catalog;
pub mod health;
pub mod theme;

use axum::Router;

use crate::state::AppState;

/// All API routes. Nested under `/api` by `axum_helpers::create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(catalog::router(state))
        .merge(theme::router())
        .merge(health::router(state.clone()))
}
