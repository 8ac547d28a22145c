//! HTTP API layer for pushboard.
//!
//! This crate provides the JSON API:
//!
//! - **Endpoints**: sign in/out, notification form, send, history
//! - **Extractors**: session authentication
//! - **Middleware**: bearer session resolution
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
