//! Middleware stack driven by [`ApiConfig`]

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header, request::Parts},
};
use paydash_core::config::ApiConfig;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};
use tracing::{debug, warn};

/// Apply body limits, request timeout, compression and CORS
pub fn apply(router: Router, api: &ApiConfig) -> Router {
    let router = router
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(api.request_timeout)))
        .layer(RequestBodyLimitLayer::new(api.max_body_bytes))
        .layer(DefaultBodyLimit::max(api.max_body_bytes));

    match cors_layer(api) {
        Some(cors) => router.layer(cors),
        None => {
            debug!("CORS disabled in configuration");
            router
        }
    }
}

/// CORS layer for the configured origins, `None` when CORS is disabled
#[must_use]
pub fn cors_layer(api: &ApiConfig) -> Option<CorsLayer> {
    if !api.enable_cors {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if api.cors_origins.iter().any(|origin| origin == "*") {
        return Some(layer.allow_origin(Any));
    }

    let allowed = api.cors_origins.clone();
    Some(layer.allow_origin(AllowOrigin::predicate(
        move |origin: &HeaderValue, _parts: &Parts| {
            let allowed_origin = origin
                .to_str()
                .is_ok_and(|origin| is_origin_allowed(origin, &allowed));
            if !allowed_origin {
                warn!("Origin {:?} not allowed by CORS policy", origin);
            }
            allowed_origin
        },
    )))
}

/// Check an origin against exact entries and `*.domain` wildcards
fn is_origin_allowed(origin: &str, allowed_origins: &[String]) -> bool {
    allowed_origins.iter().any(|allowed| {
        allowed == origin
            || allowed
                .strip_prefix("*.")
                .is_some_and(|domain| origin.ends_with(&format!(".{domain}")))
    })
}
