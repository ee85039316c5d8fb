//! Overview and per-section analytics endpoints

use crate::{error::ApiError, extractors::OverviewRequest, state::AppState};
use axum::{extract::State, response::Json};
use paydash_metrics::{
    Overview, build_overview,
    overview::{
        ConversionReport, RevenueReport, StatusReport, conversion_report, revenue_report,
        status_report,
    },
};
use std::sync::Arc;
use tracing::info;

/// Full overview: revenue buckets, status counts, conversion and all charts
///
/// # Errors
///
/// Returns 400 for invalid records, 413 for too many payments and 500 if a
/// chart cannot be drawn with the registered elements.
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    request: OverviewRequest,
) -> Result<Json<Overview>, ApiError> {
    let overview = build_overview(
        &request.ledger,
        request.today,
        &request.options,
        &state.registry,
    )?;

    info!(
        today = %overview.today,
        total = %overview.summary.total,
        conversion = %overview.conversion_rate_display,
        "Served overview"
    );
    Ok(Json(overview))
}

/// Revenue buckets with the revenue chart
///
/// # Errors
///
/// See [`get_overview`].
pub async fn get_revenue(
    State(state): State<Arc<AppState>>,
    request: OverviewRequest,
) -> Result<Json<RevenueReport>, ApiError> {
    let report = revenue_report(
        &request.ledger,
        request.today,
        &request.options,
        &state.registry,
    )?;
    Ok(Json(report))
}

/// Status counts with the status chart
///
/// # Errors
///
/// See [`get_overview`].
pub async fn get_status_counts(
    State(state): State<Arc<AppState>>,
    request: OverviewRequest,
) -> Result<Json<StatusReport>, ApiError> {
    let report = status_report(&request.ledger, &request.options, &state.registry)?;
    Ok(Json(report))
}

/// Conversion metrics with the conversion chart
///
/// # Errors
///
/// See [`get_overview`].
pub async fn get_conversion(
    State(state): State<Arc<AppState>>,
    request: OverviewRequest,
) -> Result<Json<ConversionReport>, ApiError> {
    let report = conversion_report(&request.ledger, &request.options, &state.registry)?;
    Ok(Json(report))
}
