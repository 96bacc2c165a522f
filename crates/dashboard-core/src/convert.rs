// File: crates/dashboard-core/src/convert.rs
// Summary: Conversion of fetched query results into chart series (scaling, label sort, fetch errors).

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::series::{ChartModel, Histogram, TimeSeries};

/// How sort-label values are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAs {
    #[default]
    String,
    /// Integer comparison; values that do not parse sort after all integers.
    Int,
}

/// Per-chart conversion settings applied to fetched series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionParams {
    /// Multiplier applied to every sample value.
    pub scale: f64,
    pub sort_label: Option<String>,
    pub sort_label_parse_as: SortAs,
    /// Drop the sort label from the label sets once sorted.
    pub remove_sort_label: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self { scale: 1.0, sort_label: None, sort_label_parse_as: SortAs::String, remove_sort_label: false }
    }
}

impl ConversionParams {
    pub fn scaled(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    pub fn sorted_by(mut self, label: impl Into<String>, parse_as: SortAs) -> Self {
        self.sort_label = Some(label.into());
        self.sort_label_parse_as = parse_as;
        self
    }

    pub fn removing_sort_label(mut self) -> Self {
        self.remove_sort_label = true;
        self
    }
}

/// Outcome of one backend query: the returned series, or the error it failed with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub matrix: Vec<TimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    pub fn ok(matrix: Vec<TimeSeries>) -> Self {
        Self { matrix, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { matrix: Vec::new(), error: Some(error.into()) }
    }
}

/// Scale, sort and strip the fetched series. With no sort label, or one
/// that no series carries, the input order is kept.
pub fn convert_matrix(matrix: &[TimeSeries], params: &ConversionParams) -> Vec<TimeSeries> {
    let mut out: Vec<TimeSeries> = matrix.iter().map(|ts| scale_series(ts, params.scale)).collect();

    let Some(label) = params.sort_label.as_deref() else { return out };
    if !out.iter().any(|ts| ts.label_set.contains_key(label)) {
        debug!(label, "sort label not found, keeping input order");
        return out;
    }
    // stable, so series with equal keys keep their fetched order
    out.sort_by(|a, b| compare_label(a, b, label, params.sort_label_parse_as));
    if params.remove_sort_label {
        for ts in &mut out {
            ts.label_set.shift_remove(label);
        }
    }
    out
}

fn scale_series(ts: &TimeSeries, scale: f64) -> TimeSeries {
    let mut ts = ts.clone();
    if scale != 1.0 {
        ts.values.iter_mut().for_each(|dp| dp.v *= scale);
    }
    ts
}

fn compare_label(a: &TimeSeries, b: &TimeSeries, label: &str, parse_as: SortAs) -> Ordering {
    let va = a.label_set.get(label).map_or("", String::as_str);
    let vb = b.label_set.get(label).map_or("", String::as_str);
    match parse_as {
        SortAs::String => va.cmp(vb),
        SortAs::Int => match (va.trim().parse::<i64>(), vb.trim().parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => va.cmp(vb),
        },
    }
}

impl ChartModel {
    /// Fill the metric series from a query result. A failed query records
    /// `"error in metric <name>: <error>"` and leaves the chart without series.
    pub fn fill_metric(&mut self, metric_name: &str, result: &QueryResult, params: &ConversionParams) {
        if let Some(err) = &result.error {
            warn!(chart = %self.name, metric = metric_name, error = %err, "metric query failed");
            self.error = Some(format!("error in metric {metric_name}: {err}"));
            self.metric = None;
            return;
        }
        self.metric = Some(convert_matrix(&result.matrix, params));
    }

    /// Fill the histogram from one query result per statistic. The first
    /// failed statistic records `"error in metric <name>/<stat>: <error>"`
    /// and leaves the chart without series.
    pub fn fill_histogram(
        &mut self,
        metric_name: &str,
        results: &IndexMap<String, QueryResult>,
        params: &ConversionParams,
    ) {
        let mut histogram = Histogram::new();
        for (stat, result) in results {
            if let Some(err) = &result.error {
                warn!(chart = %self.name, metric = metric_name, stat = %stat, error = %err, "histogram query failed");
                self.error = Some(format!("error in metric {metric_name}/{stat}: {err}"));
                self.histogram = None;
                return;
            }
            let series = convert_matrix(&result.matrix, params);
            if !series.is_empty() {
                histogram.insert(stat.clone(), series);
            }
        }
        self.histogram = Some(histogram);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_keys_sort_before_text() {
        let series: Vec<TimeSeries> = ["x", "3", "1"].iter().map(|k| TimeSeries::default().with_label("k", *k)).collect();
        let params = ConversionParams::default().sorted_by("k", SortAs::Int);
        let keys: Vec<String> = convert_matrix(&series, &params).iter().map(|ts| ts.label_set["k"].clone()).collect();
        assert_eq!(keys, ["1", "3", "x"]);
    }

    #[test]
    fn params_from_json() {
        let p: ConversionParams =
            serde_json::from_str(r#"{"scale":2.5,"sortLabel":"code","sortLabelParseAs":"int"}"#).unwrap();
        assert_eq!(p.scale, 2.5);
        assert_eq!(p.sort_label_parse_as, SortAs::Int);
        assert!(!p.remove_sort_label);
        assert_eq!(serde_json::from_str::<ConversionParams>("{}").unwrap(), ConversionParams::default());
    }
}
