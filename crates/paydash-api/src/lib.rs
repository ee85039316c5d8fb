//! paydash API server library

#![forbid(unsafe_code)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::Router;
use paydash_core::Config;
use paydash_core::context_error::Result;
use std::sync::Arc;

/// Build the API router with all routes and middleware
///
/// # Errors
///
/// Returns an error if the application state validation fails.
pub fn build_router(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);

    // Validate the application state
    state.validate()?;

    let api = state.config.api.clone();
    let app = routes::build_router().with_state(state);

    Ok(middleware::apply(app, &api))
}
