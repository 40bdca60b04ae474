//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::{header, HeaderMap, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result, StartupError};
use crate::metrics::{EventReporter, MetricsReporter};
use crate::models::atom::ATOM_TYPE;
use crate::models::{build_feed, render_feed, search, HealthResponse, SearchResult, StatsResponse};
use crate::upstream::{Fetcher, HttpFetcher, Resolver, Upstream};

const HOME_HTML: &str = include_str!("../../assets/home.html");

/// Application state shared across all handlers.
///
/// Built once at startup; holds the one cache per resource kind and the
/// metrics reporter they report to.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<Upstream>,
    pub metrics: Arc<MetricsReporter>,
}

impl AppState {
    /// Creates a new AppState around an already configured upstream.
    pub fn new(upstream: Upstream, metrics: Arc<MetricsReporter>) -> Self {
        Self {
            upstream: Arc::new(upstream),
            metrics,
        }
    }

    /// Wires caches, resolver and metrics around the given fetcher.
    pub fn with_fetcher(
        config: &Config,
        fetcher: Arc<dyn Fetcher>,
    ) -> std::result::Result<Self, StartupError> {
        let metrics = Arc::new(MetricsReporter::new()?);
        let reporter: Arc<dyn EventReporter> = metrics.clone();
        let upstream = Upstream::new(config, Resolver::new(fetcher, reporter));
        Ok(Self::new(upstream, metrics))
    }

    /// Creates a new AppState from configuration, talking to the real
    /// upstream over HTTP.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StartupError> {
        let fetcher = HttpFetcher::new(config.upstream_timeout())?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }
}

/// Handler for GET /
pub async fn home_handler() -> Html<&'static str> {
    Html(HOME_HTML)
}

/// Absolute URL the request was made to, as seen by the client.
fn self_url(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = match headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
    {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("{}://{}{}", scheme, host, path)
}

/// Handler for GET /feed?id=<campaign id>
///
/// Builds the Atom feed from the (cached) campaign and post list.
pub async fn feed_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response> {
    let id = params
        .get("id")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
        .ok_or_else(|| AppError::BadRequest("bad/missing param: id".to_string()))?;

    let campaign = state
        .upstream
        .campaign(id)
        .await
        .map_err(AppError::upstream("fetch campaign"))?;
    let posts = state
        .upstream
        .posts(id)
        .await
        .map_err(AppError::upstream("fetch posts"))?;

    let feed = build_feed(&campaign, &posts, &self_url(&headers, &uri), Utc::now());
    let xml = render_feed(&feed)?;
    info!(campaign = id, entries = feed.entry.len(), "served feed");

    Ok(([(header::CONTENT_TYPE, ATOM_TYPE)], xml).into_response())
}

/// Handler for GET /search?q=<query>
///
/// Translates upstream search hits into a JSON list with feed links.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SearchResult>>> {
    // Blank queries are rejected, but the query is escaped exactly as given
    let query = params
        .get("q")
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("bad/missing param: q".to_string()))?;

    let response = state
        .upstream
        .search(query)
        .await
        .map_err(AppError::upstream("search"))?;

    Ok(Json(search::translate(&response)))
}

/// Handler for GET /stats
///
/// Returns per-kind cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let metrics = state.metrics.clone();
    let caches = state.upstream.stats(|kind| metrics.snapshot(kind)).await;
    Json(StatsResponse { caches })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
