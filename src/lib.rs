//! JSON gateway for parliamentary vote results.
//!
//! `GET /vote?id=<id>` (or `POST /vote` with `{"id": "<id>"}`) fetches the
//! vote's results page, groups member names by vote category and returns
//! them as a JSON object. Each client address gets a fixed number of
//! requests per window.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;

use axum::{Router, routing::get};
use handlers::{get_votes_handler, health_handler, metrics_handler, post_votes_handler};
use state::AppState;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::{FetchError, GatewayError};
pub use extract::{Markers, VoteExtractor, VoteResult};
pub use rate_limit::RateLimiter;

// creating the router with routes
pub fn app(state: Arc<AppState>, docs_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/vote", get(get_votes_handler).post(post_votes_handler))
        .route("/metrics", get(metrics_handler))
        .nest_service("/docs", ServeDir::new(docs_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
