//! Combined overview document
//!
//! Runs the three aggregations over a [`Ledger`] and maps each result into
//! its chart. Every call recomputes from scratch.

use crate::{
    chart::{self, ChartConfig, ChartRegistry},
    conversion::{self, ConversionMetrics},
    locale,
    revenue::{self, ReportingCalendar, RevenueSummary},
    status::{self, StatusCounts},
};
use chrono::{FixedOffset, NaiveDate};
use paydash_core::{Ledger, Locale, PaymentStatus, ReportConfig, Result, utils};
use serde::Serialize;

/// Settings that shape a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Label language
    pub locale: Locale,
    /// Status that makes a payment count towards conversion
    pub buyer_status: PaymentStatus,
    /// Offset used to place payments on calendar days
    pub offset: FixedOffset,
}

impl ReportOptions {
    /// Same options with another locale
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

impl TryFrom<&ReportConfig> for ReportOptions {
    type Error = paydash_core::Error;

    fn try_from(config: &ReportConfig) -> Result<Self> {
        Ok(Self {
            locale: config.locale,
            buyer_status: config.buyer_status,
            offset: config.offset()?,
        })
    }
}

/// Section headings of the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Headings {
    /// Revenue section
    pub revenue: String,
    /// Status section
    pub status: String,
    /// Conversion section
    pub conversion: String,
    /// Caption for the user count
    pub total_users: String,
    /// Caption for the buyer count
    pub buyers: String,
}

impl Headings {
    /// Headings in `locale`
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        let labels = locale::labels(locale);
        Self {
            revenue: labels.revenue_title.to_string(),
            status: labels.status_title.to_string(),
            conversion: labels.conversion_title.to_string(),
            total_users: labels.total_users.to_string(),
            buyers: labels.buyers.to_string(),
        }
    }
}

/// Revenue buckets and their chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueReport {
    /// Bucket sums
    pub summary: RevenueSummary,
    /// Bar chart
    pub chart: ChartConfig,
}

/// Status counts and their chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Counts per status
    pub status_counts: StatusCounts,
    /// Bar chart
    pub chart: ChartConfig,
}

/// Conversion metrics and their chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    /// Buyer and user counts
    pub conversion: ConversionMetrics,
    /// Rate with two decimals and a `%` suffix
    pub conversion_rate_display: String,
    /// Pie chart
    pub chart: ChartConfig,
}

/// The three overview charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewCharts {
    /// Revenue per bucket
    pub revenue: ChartConfig,
    /// Payments per status
    pub status: ChartConfig,
    /// Buyers versus non-buyers
    pub conversion: ChartConfig,
}

/// Everything the overview panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Reference date of the revenue buckets
    pub today: NaiveDate,
    /// Label language
    pub locale: Locale,
    /// Revenue buckets
    pub summary: RevenueSummary,
    /// Payments per status
    pub status_counts: StatusCounts,
    /// Conversion metrics
    pub conversion: ConversionMetrics,
    /// Conversion rate as shown on the panel, e.g. `20.00%`
    pub conversion_rate_display: String,
    /// Section headings
    pub headings: Headings,
    /// Chart configurations
    pub charts: OverviewCharts,
}

fn checked(registry: &ChartRegistry, chart: ChartConfig) -> Result<ChartConfig> {
    registry.ensure(&chart)?;
    Ok(chart)
}

/// Revenue section
///
/// # Errors
///
/// Returns a configuration error if the revenue chart cannot be drawn with
/// `registry`.
pub fn revenue_report(
    ledger: &Ledger,
    today: NaiveDate,
    options: &ReportOptions,
    registry: &ChartRegistry,
) -> Result<RevenueReport> {
    let calendar = ReportingCalendar::new(today, options.offset);
    let summary = revenue::summarize_revenue(&ledger.payments, &calendar);
    let chart = checked(registry, chart::revenue_chart(&summary, options.locale))?;
    Ok(RevenueReport { summary, chart })
}

/// Status section
///
/// # Errors
///
/// Returns a configuration error if the status chart cannot be drawn with
/// `registry`.
pub fn status_report(
    ledger: &Ledger,
    options: &ReportOptions,
    registry: &ChartRegistry,
) -> Result<StatusReport> {
    let status_counts = status::count_statuses(&ledger.payments);
    let chart = checked(registry, chart::status_chart(&status_counts, options.locale))?;
    Ok(StatusReport {
        status_counts,
        chart,
    })
}

/// Conversion section
///
/// # Errors
///
/// Returns a configuration error if the conversion chart cannot be drawn
/// with `registry`.
pub fn conversion_report(
    ledger: &Ledger,
    options: &ReportOptions,
    registry: &ChartRegistry,
) -> Result<ConversionReport> {
    let conversion =
        conversion::compute_conversion(&ledger.users, &ledger.payments, options.buyer_status);
    let chart = checked(registry, chart::conversion_chart(&conversion, options.locale))?;
    Ok(ConversionReport {
        conversion_rate_display: utils::format_percentage(conversion.conversion_rate),
        conversion,
        chart,
    })
}

/// Build the full overview
///
/// # Errors
///
/// Returns a configuration error if any chart needs an element missing from
/// `registry`.
pub fn build_overview(
    ledger: &Ledger,
    today: NaiveDate,
    options: &ReportOptions,
    registry: &ChartRegistry,
) -> Result<Overview> {
    let revenue = revenue_report(ledger, today, options, registry)?;
    let status = status_report(ledger, options, registry)?;
    let conversion = conversion_report(ledger, options, registry)?;

    tracing::info!(
        %today,
        payments = ledger.payments.len(),
        users = ledger.users.len(),
        locale = options.locale.tag(),
        "Built overview"
    );

    Ok(Overview {
        today,
        locale: options.locale,
        summary: revenue.summary,
        status_counts: status.status_counts,
        conversion: conversion.conversion,
        conversion_rate_display: conversion.conversion_rate_display,
        headings: Headings::for_locale(options.locale),
        charts: OverviewCharts {
            revenue: revenue.chart,
            status: status.chart,
            conversion: conversion.chart,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::chart::ChartElement;
    use chrono::TimeZone;
    use paydash_core::{Payment, User};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn options() -> ReportOptions {
        ReportOptions::try_from(&ReportConfig::default()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 5).unwrap()
    }

    fn ledger() -> Ledger {
        let at = |day: u32| offset().with_ymd_and_hms(2025, 2, day, 10, 0, 0).unwrap();
        let users = (0..10).map(|i| User::new(format!("u{i}"))).collect();
        let payments = vec![
            Payment::new("u1", Decimal::from(100), at(5), PaymentStatus::Success),
            Payment::new("u1", Decimal::from(50), at(4), PaymentStatus::Pending),
            Payment::new("u2", Decimal::from(25), at(4), PaymentStatus::Pending),
        ];
        Ledger::new(users, payments)
    }

    #[test]
    fn test_report_options_from_default_config() {
        let options = options();
        assert_eq!(options.locale, Locale::Vi);
        assert_eq!(options.buyer_status, PaymentStatus::Pending);
        assert_eq!(options.offset, offset());
        assert_eq!(options.with_locale(Locale::En).locale, Locale::En);
    }

    #[test]
    fn test_report_options_reject_bad_offset() {
        let config = ReportConfig {
            utc_offset_minutes: 24 * 60,
            ..ReportConfig::default()
        };
        assert!(ReportOptions::try_from(&config).is_err());
    }

    #[test]
    fn test_build_overview() {
        let overview =
            build_overview(&ledger(), today(), &options(), &ChartRegistry::standard()).unwrap();

        assert_eq!(overview.summary.today, Decimal::from(100));
        assert_eq!(overview.summary.yesterday, Decimal::from(75));
        assert_eq!(overview.summary.total, Decimal::from(175));
        assert_eq!(overview.status_counts.values(), [1, 2, 0]);
        assert_eq!(overview.conversion.buyers, 2);
        assert_eq!(overview.conversion.conversion_rate, 20.0);
        assert_eq!(overview.conversion_rate_display, "20.00%");
        assert_eq!(overview.headings.revenue, "Tổng doanh thu");
        assert_eq!(overview.headings.buyers, "Tổng số Người đã nạp");
        assert_eq!(overview.charts.conversion.data.datasets[0].data, vec![2.0, 8.0]);
    }

    #[test]
    fn test_overview_serializes_camel_case() {
        let overview =
            build_overview(&ledger(), today(), &options(), &ChartRegistry::standard()).unwrap();
        let json = serde_json::to_value(&overview).unwrap();

        assert_eq!(json["today"], "2025-02-05");
        assert_eq!(json["locale"], "vi");
        assert_eq!(json["summary"]["thisMonth"], 175.0);
        assert_eq!(json["statusCounts"]["pending"], 2);
        assert_eq!(json["conversionRateDisplay"], "20.00%");
        assert_eq!(json["headings"]["totalUsers"], "Tổng số User");
        assert_eq!(json["charts"]["revenue"]["type"], "bar");
        assert_eq!(json["charts"]["conversion"]["type"], "pie");
    }

    #[test]
    fn test_empty_ledger() {
        let overview = build_overview(
            &Ledger::default(),
            today(),
            &options(),
            &ChartRegistry::standard(),
        )
        .unwrap();

        assert_eq!(overview.summary, RevenueSummary::default());
        assert_eq!(overview.status_counts.total(), 0);
        assert_eq!(overview.conversion_rate_display, "0.00%");
        assert_eq!(
            overview.charts.conversion.data.datasets[0].formatted_labels,
            vec!["0%", "0%"]
        );
    }

    #[test]
    fn test_conversion_display_rounds_ties_up() {
        let at = offset().with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap();
        let users = (0..800).map(|i| User::new(format!("u{i}"))).collect();
        let payments = vec![Payment::new("u1", Decimal::from(10), at, PaymentStatus::Pending)];

        let overview = build_overview(
            &Ledger::new(users, payments),
            today(),
            &options(),
            &ChartRegistry::standard(),
        )
        .unwrap();

        assert_eq!(overview.conversion_rate_display, "0.13%");
        assert_eq!(
            overview.charts.conversion.data.datasets[0].formatted_labels[0],
            "0.13%"
        );
    }

    #[test]
    fn test_missing_registration_fails() {
        let mut registry = ChartRegistry::empty();
        registry
            .register(ChartElement::BarElement)
            .register(ChartElement::CategoryScale)
            .register(ChartElement::LinearScale)
            .register(ChartElement::Tooltip)
            .register(ChartElement::Legend)
            .register(ChartElement::DataLabels);

        assert!(status_report(&ledger(), &options(), &registry).is_ok());

        let err = build_overview(&ledger(), today(), &options(), &registry).unwrap_err();
        assert!(matches!(err, paydash_core::Error::Configuration { .. }));
        assert!(err.to_string().contains("ArcElement"));
    }

    #[test]
    fn test_english_overview() {
        let options = options().with_locale(Locale::En);
        let report = conversion_report(&ledger(), &options, &ChartRegistry::standard()).unwrap();

        assert_eq!(report.chart.data.labels, vec!["Buyers", "Non-buyers"]);
        assert_eq!(report.conversion_rate_display, "20.00%");
    }
}
