use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod extract;
pub mod health;
pub mod todos;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(todos::router(state))
}
