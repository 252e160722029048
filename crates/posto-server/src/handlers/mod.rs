//! HTTP handlers

pub mod error;
pub mod health;
pub mod ufos;

pub use health::health;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ufos", get(ufos::list).post(ufos::create))
        .route("/ufos/:id", get(ufos::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
