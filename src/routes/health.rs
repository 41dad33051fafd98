use axum::{Router, routing::get};

use crate::response::Envelope;

pub const HEALTH_MESSAGE: &str = "Application is started and healthy!";

pub fn router() -> Router {
    Router::new().route("/", get(health))
}

async fn health() -> Envelope<()> {
    Envelope::done(HEALTH_MESSAGE)
}
