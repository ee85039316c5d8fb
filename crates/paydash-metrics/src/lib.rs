//! Payment aggregations and chart mapping for the admin overview
//!
//! The aggregations are pure functions over validated [`paydash_core`]
//! records. [`overview::build_overview`] combines them with their charts.

#![forbid(unsafe_code)]

pub mod chart;
pub mod conversion;
pub mod locale;
pub mod overview;
pub mod revenue;
pub mod status;

pub use chart::{ChartConfig, ChartError, ChartKind, ChartRegistry, LabelFormat};
pub use conversion::{ConversionMetrics, compute_conversion};
pub use overview::{Overview, ReportOptions, build_overview};
pub use revenue::{ReportingCalendar, RevenueBucket, RevenueSummary, summarize_revenue};
pub use status::{StatusCounts, count_statuses};
