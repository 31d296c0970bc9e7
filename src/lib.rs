//! Caching HTTP proxy for a GitHub user's public gists.
//!
//! `GET /{username}` fetches the user's gists from the GitHub REST API,
//! reduces each record to a [`models::GistSummary`] and memoizes the outcome
//! in a bounded LRU cache keyed by `(username, per_page, page)`.

pub mod cache;
pub mod config;
pub mod error;
pub mod gists;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod simplify;
pub mod state;
pub mod upstream;

use axum::{Router, routing::get};

use crate::handlers::{gists_handler, health_handler, metrics_handler, root_handler};
use crate::state::AppState;

// static routes win over the username capture
pub fn app(state: AppState) -> Router {
    metrics::register();

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{username}", get(gists_handler))
        .with_state(state)
}
