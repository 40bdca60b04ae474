//! Metrics Module
//!
//! Cache hit/miss reporting and its Prometheus scrape endpoint.

mod reporter;

pub use reporter::{
    CacheOutcome, EventReporter, KindCounts, MetricsReporter, CACHE_CHECK_METRIC,
};

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{Encoder, TextEncoder};
use tracing::warn;

/// Router for the metrics listener: `GET /metrics`.
pub fn metrics_router(reporter: Arc<MetricsReporter>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(reporter)
}

async fn metrics_handler(State(reporter): State<Arc<MetricsReporter>>) -> Response {
    match reporter.render() {
        Ok(text) => (
            [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
            text,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
