//! Chart.js shaped chart configuration
//!
//! The structures serialize to the `{ type, data, options }` object Chart.js
//! takes, so a frontend can pass them through unchanged. Value labels are
//! also pre-rendered into `formattedLabels` for clients without a formatter.

use crate::{
    conversion::ConversionMetrics,
    locale::{self, CONVERSION_PALETTE, Palette, REVENUE_PALETTE, STATUS_PALETTE},
    revenue::RevenueSummary,
    status::StatusCounts,
};
use paydash_core::{Locale, utils};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bar chart
    Bar,
    /// Pie chart
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => f.write_str("bar"),
            Self::Pie => f.write_str("pie"),
        }
    }
}

/// Complete configuration for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart type
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Labels and datasets
    pub data: ChartData,
    /// Display options
    pub options: ChartOptions,
}

/// Labels plus one or more parallel datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Category labels
    pub labels: Vec<String>,
    /// Datasets, each parallel to `labels`
    pub datasets: Vec<Dataset>,
}

/// One series of values with its styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend label
    pub label: String,
    /// Values
    pub data: Vec<f64>,
    /// Fill color per value
    pub background_color: Vec<String>,
    /// Border color per value
    pub border_color: Vec<String>,
    /// Border width in pixels
    pub border_width: u32,
    /// Values rendered with the chart's label format
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formatted_labels: Vec<String>,
}

/// Chart options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Plugin options
    pub plugins: Plugins,
    /// Axis options, bar charts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// Plugin options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    /// Legend plugin
    pub legend: LegendOptions,
    /// Value label plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datalabels: Option<DataLabelsOptions>,
}

/// Legend plugin options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    /// Show the legend
    pub display: bool,
}

/// Value label plugin options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLabelsOptions {
    /// Label color
    pub color: String,
    /// Label font
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontOptions>,
    /// How values are rendered
    pub format: LabelFormat,
}

/// Font options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontOptions {
    /// CSS font weight
    pub weight: String,
}

/// Axis options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scales {
    /// Value axis
    pub y: AxisOptions,
}

/// Options for a single axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    /// Start the axis at zero
    pub begin_at_zero: bool,
}

/// How a value label is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LabelFormat {
    /// Amount in dong, e.g. `200.000 ₫`
    Currency {
        /// Locale of the formatter
        locale: Locale,
    },
    /// Share of the dataset sum with two decimals, `0%` for an empty sum
    PercentOfTotal,
    /// Raw number
    Plain,
}

impl LabelFormat {
    /// Render every value of a dataset
    #[must_use]
    pub fn render(&self, data: &[f64]) -> Vec<String> {
        match self {
            Self::Currency { locale } => data
                .iter()
                .map(|value| utils::format_currency(Decimal::try_from(*value).unwrap_or_default(), *locale))
                .collect(),
            Self::PercentOfTotal => {
                let total: f64 = data.iter().sum();
                data.iter().map(|value| utils::format_share(*value, total)).collect()
            }
            Self::Plain => data.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Chart building blocks a renderer has to know before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartElement {
    /// Bars
    BarElement,
    /// Pie slices
    ArcElement,
    /// Category (x) axis
    CategoryScale,
    /// Linear (y) axis
    LinearScale,
    /// Hover tooltips
    Tooltip,
    /// Legend
    Legend,
    /// Value labels
    DataLabels,
}

impl fmt::Display for ChartElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BarElement => "BarElement",
            Self::ArcElement => "ArcElement",
            Self::CategoryScale => "CategoryScale",
            Self::LinearScale => "LinearScale",
            Self::Tooltip => "Tooltip",
            Self::Legend => "Legend",
            Self::DataLabels => "ChartDataLabels",
        };
        f.write_str(name)
    }
}

/// Errors raised while preparing charts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// A chart needs an element that was never registered
    #[error("{kind} chart requires unregistered element {element}")]
    MissingElement {
        /// Chart type
        kind: ChartKind,
        /// Missing element
        element: ChartElement,
    },
}

impl From<ChartError> for paydash_core::Error {
    fn from(err: ChartError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

/// Set of chart elements available to renderers.
///
/// Built once during process setup and passed to whatever builds charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartRegistry {
    elements: BTreeSet<ChartElement>,
}

impl ChartRegistry {
    /// Registry with nothing registered
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every element the overview charts use
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register(ChartElement::BarElement)
            .register(ChartElement::CategoryScale)
            .register(ChartElement::ArcElement)
            .register(ChartElement::LinearScale)
            .register(ChartElement::DataLabels)
            .register(ChartElement::Tooltip)
            .register(ChartElement::Legend);
        registry
    }

    /// Register an element
    pub fn register(&mut self, element: ChartElement) -> &mut Self {
        self.elements.insert(element);
        self
    }

    /// Whether `element` is registered
    #[must_use]
    pub fn contains(&self, element: ChartElement) -> bool {
        self.elements.contains(&element)
    }

    /// Registered elements in a stable order
    pub fn elements(&self) -> impl Iterator<Item = ChartElement> + '_ {
        self.elements.iter().copied()
    }

    /// Check that every element `chart` needs is registered
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::MissingElement`] for the first missing element.
    pub fn ensure(&self, chart: &ChartConfig) -> Result<(), ChartError> {
        chart
            .required_elements()
            .into_iter()
            .find(|element| !self.contains(*element))
            .map_or(Ok(()), |element| {
                Err(ChartError::MissingElement {
                    kind: chart.kind,
                    element,
                })
            })
    }
}

impl ChartConfig {
    /// Elements a renderer needs to draw this chart
    #[must_use]
    pub fn required_elements(&self) -> Vec<ChartElement> {
        let mut elements = match self.kind {
            ChartKind::Bar => vec![
                ChartElement::BarElement,
                ChartElement::CategoryScale,
                ChartElement::LinearScale,
            ],
            ChartKind::Pie => vec![ChartElement::ArcElement],
        };
        elements.push(ChartElement::Tooltip);
        if self.options.plugins.legend.display {
            elements.push(ChartElement::Legend);
        }
        if self.options.plugins.datalabels.is_some() {
            elements.push(ChartElement::DataLabels);
        }
        elements
    }
}

fn dataset<const N: usize>(label: &str, data: Vec<f64>, palette: &Palette<N>) -> Dataset {
    Dataset {
        label: label.to_string(),
        data,
        background_color: palette.background.iter().map(ToString::to_string).collect(),
        border_color: palette.border.iter().map(ToString::to_string).collect(),
        border_width: 1,
        formatted_labels: Vec::new(),
    }
}

fn bar_options(datalabels: Option<DataLabelsOptions>) -> ChartOptions {
    ChartOptions {
        plugins: Plugins {
            legend: LegendOptions { display: true },
            datalabels,
        },
        scales: Some(Scales {
            y: AxisOptions {
                begin_at_zero: true,
            },
        }),
    }
}

fn with_formatted_labels(mut config: ChartConfig) -> ChartConfig {
    if let Some(datalabels) = &config.options.plugins.datalabels {
        for dataset in &mut config.data.datasets {
            dataset.formatted_labels = datalabels.format.render(&dataset.data);
        }
    }
    config
}

#[allow(clippy::cast_precision_loss)]
const fn count_value(count: usize) -> f64 {
    count as f64
}

/// Revenue bar chart with currency value labels
#[must_use]
pub fn revenue_chart(summary: &RevenueSummary, locale: Locale) -> ChartConfig {
    let labels = locale::labels(locale);
    let data = summary
        .values()
        .iter()
        .map(|value| value.to_f64().unwrap_or_default())
        .collect();

    with_formatted_labels(ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.revenue_buckets.iter().map(ToString::to_string).collect(),
            datasets: vec![dataset(labels.revenue_dataset, data, &REVENUE_PALETTE)],
        },
        options: bar_options(Some(DataLabelsOptions {
            color: "#000".to_string(),
            font: None,
            format: LabelFormat::Currency { locale },
        })),
    })
}

/// Status count bar chart
#[must_use]
pub fn status_chart(counts: &StatusCounts, locale: Locale) -> ChartConfig {
    let labels = locale::labels(locale);
    let data = counts.values().iter().map(|count| count_value(*count)).collect();

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.statuses.iter().map(ToString::to_string).collect(),
            datasets: vec![dataset(labels.status_dataset, data, &STATUS_PALETTE)],
        },
        options: bar_options(None),
    }
}

/// Buyers versus non-buyers pie chart with percentage value labels
#[must_use]
pub fn conversion_chart(metrics: &ConversionMetrics, locale: Locale) -> ChartConfig {
    let labels = locale::labels(locale);
    let data = vec![count_value(metrics.buyers), count_value(metrics.non_buyers)];

    with_formatted_labels(ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels: labels.conversion_slices.iter().map(ToString::to_string).collect(),
            datasets: vec![dataset(labels.conversion_dataset, data, &CONVERSION_PALETTE)],
        },
        options: ChartOptions {
            plugins: Plugins {
                legend: LegendOptions { display: true },
                datalabels: Some(DataLabelsOptions {
                    color: "#fff".to_string(),
                    font: Some(FontOptions {
                        weight: "bold".to_string(),
                    }),
                    format: LabelFormat::PercentOfTotal,
                }),
            },
            scales: None,
        },
    })
}
