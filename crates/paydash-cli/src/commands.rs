//! Subcommand implementations
//!
//! Each command renders its output to a `String`; `main` prints it.

use chrono::NaiveDate;
use paydash_core::{
    Config, Ledger, Locale, OverviewInput, PaymentStatus,
    context_error::{ResultExt, Result},
    utils,
};
use paydash_metrics::{
    ChartRegistry, Overview, ReportOptions, RevenueBucket, build_overview, locale,
};
use std::{fs, path::Path};
use tracing::{debug, info};

/// Settings for `overview` and `summary` that can come from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// Reference date
    pub today: Option<NaiveDate>,
    /// Label language
    pub locale: Option<Locale>,
}

/// Read an input document
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid input document.
pub fn read_input(path: &Path) -> Result<OverviewInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let input: OverviewInput = serde_json::from_str(&content)
        .with_context(|| format!("Invalid input document {}", path.display()))?;

    debug!(
        users = input.users.len(),
        payments = input.payments.len(),
        "Read input from {}",
        path.display()
    );
    Ok(input)
}

/// Build the overview for an input file
///
/// Command line overrides win over values in the file, which win over the
/// configuration.
///
/// # Errors
///
/// Returns an error if the input is unreadable or invalid, or a chart cannot
/// be drawn with `registry`.
pub fn compute_overview(
    config: &Config,
    registry: &ChartRegistry,
    path: &Path,
    overrides: Overrides,
) -> Result<Overview> {
    let input = read_input(path)?;

    let mut options = ReportOptions::try_from(&config.report)?;
    if let Some(locale) = overrides.locale.or(input.locale) {
        options = options.with_locale(locale);
    }
    let today = match overrides.today.or(input.today) {
        Some(today) => today,
        None => config.report.today()?,
    };

    let ledger = Ledger::from_raw(input.users, input.payments, options.offset)?;
    let overview = build_overview(&ledger, today, &options, registry)?;

    info!(
        payments = ledger.payments.len(),
        users = ledger.users.len(),
        "Computed overview for {}",
        path.display()
    );
    Ok(overview)
}

/// `paydash overview`: the overview document as JSON
///
/// # Errors
///
/// See [`compute_overview`].
pub fn overview(
    config: &Config,
    registry: &ChartRegistry,
    path: &Path,
    overrides: Overrides,
    pretty: bool,
) -> Result<String> {
    let overview = compute_overview(config, registry, path, overrides)?;
    let json = if pretty {
        serde_json::to_string_pretty(&overview)?
    } else {
        serde_json::to_string(&overview)?
    };
    Ok(json)
}

/// `paydash summary`: a plain-text table of the overview numbers
///
/// # Errors
///
/// See [`compute_overview`].
pub fn summary(
    config: &Config,
    registry: &ChartRegistry,
    path: &Path,
    overrides: Overrides,
) -> Result<String> {
    let overview = compute_overview(config, registry, path, overrides)?;
    Ok(render_summary(&overview))
}

fn render_summary(overview: &Overview) -> String {
    let labels = locale::labels(overview.locale);
    let conversion = &overview.conversion;
    let mut out = format!("{} ({})\n", overview.headings.revenue, overview.today);

    for (label, bucket) in labels.revenue_buckets.iter().zip(RevenueBucket::ALL) {
        let amount = utils::format_currency(overview.summary.get(bucket), overview.locale);
        out.push_str(&row(label, &amount));
    }

    out.push_str(&format!("\n{}\n", overview.headings.status));
    for (label, status) in labels.statuses.iter().zip(PaymentStatus::ALL) {
        let count = utils::format_count(overview.status_counts.get(status), overview.locale);
        out.push_str(&row(label, &count));
    }

    out.push_str(&format!("\n{}\n", overview.headings.conversion));
    out.push_str(&row(
        &overview.headings.total_users,
        &utils::format_count(conversion.total_users, overview.locale),
    ));
    out.push_str(&row(
        &overview.headings.buyers,
        &utils::format_count(conversion.buyers, overview.locale),
    ));
    out.push_str(&row(labels.conversion_title, &overview.conversion_rate_display));

    out
}

/// One indented `label value` line of the summary table
fn row(label: &str, value: &str) -> String {
    format!("  {label:<24}{value:>20}\n")
}

/// `paydash config --show`: the resolved configuration as TOML
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn show_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).with_context(|| "Failed to serialize configuration")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const INPUT: &str = r#"{
        "users": [{"id": "u0"}, {"id": "u1"}, {"id": "u2"}, {"id": "u3"}],
        "payments": [
            {"code_payment": "PAYMENT1", "user_id": "u1", "amount": 200000,
             "date": "2025-02-05T08:00:00", "status": "pending"},
            {"code_payment": "PAYMENT2", "user_id": "u2", "amount": 50000,
             "date": "2025-02-04T08:00:00", "status": "success"}
        ]
    }"#;

    fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn today() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 2, 5)
    }

    #[test]
    fn test_overview_json() {
        let file = input_file(INPUT);
        let overrides = Overrides {
            today: today(),
            locale: None,
        };

        let json = overview(
            &Config::default(),
            &ChartRegistry::standard(),
            file.path(),
            overrides,
            false,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["today"], 200_000.0);
        assert_eq!(value["summary"]["yesterday"], 50_000.0);
        assert_eq!(value["conversionRateDisplay"], "25.00%");
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_overview_pretty() {
        let file = input_file(INPUT);
        let json = overview(
            &Config::default(),
            &ChartRegistry::standard(),
            file.path(),
            Overrides {
                today: today(),
                locale: Some(Locale::En),
            },
            true,
        )
        .unwrap();

        assert!(json.contains('\n'));
        assert!(json.contains("\"locale\": \"en\""));
    }

    #[test]
    fn test_input_date_and_locale_are_used() {
        let file = input_file(r#"{"today": "2025-02-04", "locale": "en"}"#);

        let overview = compute_overview(
            &Config::default(),
            &ChartRegistry::standard(),
            file.path(),
            Overrides::default(),
        )
        .unwrap();

        assert_eq!(overview.today, NaiveDate::from_ymd_opt(2025, 2, 4).unwrap());
        assert_eq!(overview.locale, Locale::En);
    }

    #[test]
    fn test_summary_table() {
        let file = input_file(INPUT);
        let table = summary(
            &Config::default(),
            &ChartRegistry::standard(),
            file.path(),
            Overrides {
                today: today(),
                locale: None,
            },
        )
        .unwrap();

        assert!(table.starts_with("Tổng doanh thu (2025-02-05)"));
        assert!(table.contains("200.000\u{a0}₫"));
        assert!(table.contains("250.000\u{a0}₫"));
        assert!(table.contains("Đang xử lý"));
        assert!(table.contains("25.00%"));
    }

    #[test]
    fn test_invalid_record_reports_location() {
        let file = input_file(
            r#"{"payments": [{"user_id": "u1", "amount": 1, "date": "yesterday", "status": "success"}]}"#,
        );

        let err = compute_overview(
            &Config::default(),
            &ChartRegistry::standard(),
            file.path(),
            Overrides::default(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("payments[0].date"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input(Path::new("/nonexistent/paydash-input.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read input file"));
    }

    #[test]
    fn test_malformed_file() {
        let file = input_file("not json");
        let err = read_input(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid input document"));
    }

    #[test]
    fn test_show_config_round_trips_defaults() {
        let rendered = show_config(&Config::default()).unwrap();

        assert!(rendered.contains("[report]"));
        assert!(rendered.contains("buyer_status = \"pending\""));
        assert!(rendered.contains("utc_offset_minutes = 420"));
    }
}
