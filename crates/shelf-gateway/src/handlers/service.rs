//! Service-level handlers

use axum::{http::StatusCode, response::IntoResponse};

/// Greeting served at the root
pub const GREETING: &str = "Hello Hono!";

/// GET / - Greeting
pub async fn hello() -> &'static str {
    GREETING
}

/// HEAD / - Health check
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
