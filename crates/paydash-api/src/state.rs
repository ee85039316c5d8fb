//! Application state management

use chrono::NaiveDate;
use paydash_core::{Config, context_error, context_error::Result};
use paydash_metrics::{ChartRegistry, ReportOptions};
use std::time::Instant;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Report settings derived from `config.report`
    pub options: ReportOptions,
    /// Chart elements available to the chart mapper
    pub registry: ChartRegistry,
    /// When the state was created
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the report configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let options = ReportOptions::try_from(&config.report)?;

        Ok(Self {
            config,
            options,
            registry: ChartRegistry::standard(),
            started_at: Instant::now(),
        })
    }

    /// Seconds since the state was created
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Current date in the reporting time zone
    ///
    /// # Errors
    ///
    /// Returns an error if the configured offset is out of range.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(self.config.report.today()?)
    }

    /// Check if the application is properly configured
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        if self.registry.elements().next().is_none() {
            return Err(context_error!("Chart registry is empty"));
        }

        Ok(())
    }
}
