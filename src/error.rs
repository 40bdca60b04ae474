//! Error types for the feed proxy
//!
//! Upstream failures (fetch, decode) and the HTTP-boundary error that renders
//! them, using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::ResourceKind;

/// Longest body excerpt carried inside an error, in bytes.
pub const MAX_EXCERPT_BYTES: usize = 512;

// == Fetch Error ==
/// Failure reaching the upstream API or a non-200 answer from it.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("get {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a status other than 200
    #[error("get {url}: status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => url,
        }
    }

    /// Upstream status code, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            FetchError::Status { status, .. } => Some(*status),
        }
    }
}

// == Decode Error ==
/// Upstream body that is not valid for the expected shape.
#[derive(Error, Debug)]
#[error("decode {kind} response: {source} (body: {excerpt})")]
pub struct DecodeError {
    pub kind: ResourceKind,
    /// Leading part of the raw body
    pub excerpt: String,
    #[source]
    pub source: serde_json::Error,
}

// == Resolve Error ==
/// Why a memoized resolution failed. Never cached.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("fetch {kind} {key}: {source}")]
    Fetch {
        kind: ResourceKind,
        key: String,
        #[source]
        source: FetchError,
    },

    #[error("decode {kind} {key}: {source}")]
    Decode {
        kind: ResourceKind,
        key: String,
        #[source]
        source: DecodeError,
    },
}

impl ResolveError {
    /// Name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            ResolveError::Fetch { .. } => "fetch",
            ResolveError::Decode { .. } => "decode",
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResolveError::Fetch { kind, .. } | ResolveError::Decode { kind, .. } => *kind,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ResolveError::Fetch { key, .. } | ResolveError::Decode { key, .. } => key,
        }
    }
}

// == Startup Error ==
/// Failure wiring the shared application state.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("building upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("registering metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

// == App Error ==
/// Error type for HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed query parameter
    #[error("{0}")]
    BadRequest(String),

    /// An upstream resolution failed during `stage`
    #[error("internal error: {stage}: {source}")]
    Upstream {
        stage: &'static str,
        #[source]
        source: ResolveError,
    },

    /// Feed serialization failed
    #[error("internal error: render: {0}")]
    Render(String),
}

impl AppError {
    /// Wraps a resolve error with the handler stage it happened in.
    pub fn upstream(stage: &'static str) -> impl FnOnce(ResolveError) -> Self {
        move |source| AppError::Upstream { stage, source }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, AppError>;

/// Returns at most `MAX_EXCERPT_BYTES` of `body` as lossy UTF-8, cut on a
/// char boundary.
pub fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_EXCERPT_BYTES {
        return text.into_owned();
    }
    let mut end = MAX_EXCERPT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
