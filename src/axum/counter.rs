//! Demo routes around the shared process-lifetime counter.

use std::sync::atomic::Ordering;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;

use super::{CounterExt, Router};

pub fn router() -> Router {
    Router::new().route("/api/counter", get(counter).post(increment))
}

/// Reads the current value without changing it.
pub async fn counter(Extension(counter): CounterExt) -> impl IntoResponse {
    counter.load(Ordering::Relaxed).to_string()
}

/// Bumps the counter, answering with the new value.
pub async fn increment(Extension(counter): CounterExt) -> impl IntoResponse {
    (counter.fetch_add(1, Ordering::Relaxed) + 1).to_string()
}
