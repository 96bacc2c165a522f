// File: crates/dashboard-core/src/naming.rs
// Summary: Display names for series and histogram statistics, plus stable chart keys.
// Notes:
// - Plain metrics with labels are named by their labels only, while histogram
//   statistics append the statistic (`"<labels>: p99"`). Both call sites rely
//   on this, so the two shapes are kept as-is.

use crate::labels::{display_value, is_visible, LabelSelection, LabelSet, Prettifier};
use crate::series::{Histogram, TimeSeries};
use crate::types::RESERVED_LABEL;

/// Short display form of well-known quantile keys; other keys pass through.
pub fn stat_display_name(stat: &str) -> &str {
    match stat {
        "0.5" => "p50",
        "0.95" => "p95",
        "0.99" => "p99",
        "0.999" => "p99.9",
        other => other,
    }
}

/// Comma-joined label values in label order, skipping the reserved label.
pub fn joined_labels(labels: &LabelSet, prettifier: Option<Prettifier<'_>>) -> String {
    labels
        .iter()
        .filter(|(name, _)| name.as_str() != RESERVED_LABEL)
        .map(|(name, value)| display_value(prettifier, name, value))
        .collect::<Vec<_>>()
        .join(",")
}

/// Name plain metric series: labels only, or the chart name when unlabeled.
pub fn name_metric_series<'s>(
    chart_name: &str,
    series: impl IntoIterator<Item = &'s TimeSeries>,
    prettifier: Option<Prettifier<'_>>,
) -> Vec<TimeSeries> {
    series
        .into_iter()
        .map(|ts| {
            let labels = joined_labels(&ts.label_set, prettifier);
            let name = if labels.is_empty() { chart_name.to_string() } else { labels };
            ts.clone().with_name(name)
        })
        .collect()
}

/// Name the series of one histogram statistic: `"<labels>: <stat>"`, or the
/// statistic alone when unlabeled.
pub fn name_histogram_stat<'s>(
    stat: &str,
    series: impl IntoIterator<Item = &'s TimeSeries>,
    prettifier: Option<Prettifier<'_>>,
) -> Vec<TimeSeries> {
    let stat = stat_display_name(stat);
    series
        .into_iter()
        .map(|ts| {
            let labels = joined_labels(&ts.label_set, prettifier);
            let name = if labels.is_empty() { stat.to_string() } else { format!("{labels}: {stat}") };
            ts.clone().with_name(name)
        })
        .collect()
}

pub fn filter_and_name_metric(
    chart_name: &str,
    metrics: &[TimeSeries],
    selection: &LabelSelection,
    prettifier: Option<Prettifier<'_>>,
) -> Vec<TimeSeries> {
    let visible = metrics.iter().filter(|ts| is_visible(&ts.label_set, selection));
    name_metric_series(chart_name, visible, prettifier)
}

pub fn filter_and_name_histogram(
    histogram: &Histogram,
    selection: &LabelSelection,
    prettifier: Option<Prettifier<'_>>,
) -> Histogram {
    histogram
        .iter()
        .map(|(stat, series)| {
            let visible = series.iter().filter(|ts| is_visible(&ts.label_set, selection));
            (stat.clone(), name_histogram_stat(stat, visible, prettifier))
        })
        .collect()
}

/// Key identifying a chart's series shape, used to detect layout changes.
pub fn generate_key(series: &[TimeSeries], chart_name: &str) -> String {
    let Some(first) = series.first() else {
        return "blank".to_string();
    };
    if first.label_set.is_empty() {
        return chart_name.to_string();
    }
    let names: Vec<&str> = first.label_set.keys().map(String::as_str).collect();
    format!("{}-{}", chart_name, names.join("-"))
}
