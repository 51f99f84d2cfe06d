//! HTTP route definitions

use crate::{handlers, middleware, AppState};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, head, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main router
pub fn create_router(state: Arc<AppState>) -> Router {
    // The size guard only wraps uploads
    let upload = post(handlers::upload_object).route_layer(axum_middleware::from_fn_with_state(
        Arc::clone(&state),
        middleware::size_guard_middleware,
    ));

    let router = Router::new()
        .route("/", get(handlers::hello))
        .route("/", head(handlers::health_check))
        .route("/", upload)
        .route("/list", get(handlers::list_objects))
        // Apply middleware
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(DefaultBodyLimit::max(state.config.max_upload_size));

    let router = match cors_layer(&state) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// CORS configuration
fn cors_layer(state: &AppState) -> Option<CorsLayer> {
    let config = &state.config;
    if !config.cors_enabled {
        return None;
    }

    let origins = if config.cors_allows_any() {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any),
    )
}
