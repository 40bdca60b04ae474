//! API Module
//!
//! HTTP handlers and routing for the feed proxy.
//!
//! # Endpoints
//! - `GET /` - Landing page
//! - `GET /feed?id=` - Atom feed for a campaign
//! - `GET /search?q=` - Campaign search as JSON
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
