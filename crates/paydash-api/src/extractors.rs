//! Request extractors

use crate::{error::ApiError, state::AppState};
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use chrono::NaiveDate;
use paydash_core::{Error, Ledger, OverviewInput};
use paydash_metrics::ReportOptions;
use std::sync::Arc;
use tracing::debug;

/// Overview request body, parsed and validated into a [`Ledger`]
///
/// Rejects bodies with more payments than `api.max_payments` before
/// validating any record.
#[derive(Debug)]
pub struct OverviewRequest {
    /// Validated users and payments
    pub ledger: Ledger,
    /// Reference date, from the body or the current reporting date
    pub today: NaiveDate,
    /// Configured report options with the requested locale applied
    pub options: ReportOptions,
}

#[async_trait]
impl FromRequest<Arc<AppState>> for OverviewRequest {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<OverviewInput>::from_request(req, state).await?;
        Self::from_input(input, state)
    }
}

impl OverviewRequest {
    /// Validate a deserialized body against the state's limits and settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::LimitExceeded`] for too many payments and a
    /// validation error for the first invalid record.
    pub fn from_input(input: OverviewInput, state: &AppState) -> Result<Self, ApiError> {
        let limit = state.config.api.max_payments;
        if input.payments.len() > limit {
            return Err(Error::LimitExceeded {
                limit,
                actual: input.payments.len(),
            }
            .into());
        }

        let options = input
            .locale
            .map_or(state.options, |locale| state.options.with_locale(locale));
        let today = match input.today {
            Some(today) => today,
            None => state.config.report.today()?,
        };
        let ledger = Ledger::from_raw(input.users, input.payments, options.offset)?;

        debug!(
            users = ledger.users.len(),
            payments = ledger.payments.len(),
            %today,
            "Accepted overview request"
        );

        Ok(Self {
            ledger,
            today,
            options,
        })
    }
}
