// File: crates/dashboard-core/src/series.rs
// Summary: Input model: datapoints, labeled time series, histograms and chart models.
// Notes:
// - JSON layout follows what the metrics backend emits: camelCase fields,
//   datapoints as `[seconds, value]` pairs with values as numbers or strings.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ChartError;
use crate::labels::LabelSet;

/// One sample: timestamp in seconds since epoch, and its value (may be NaN).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDatapoint", into = "RawDatapoint")]
pub struct Datapoint {
    pub t: f64,
    pub v: f64,
}

impl Datapoint {
    pub const fn new(t: f64, v: f64) -> Self { Self { t, v } }
}

impl From<(f64, f64)> for Datapoint {
    fn from((t, v): (f64, f64)) -> Self { Self { t, v } }
}

#[derive(Serialize, Deserialize)]
struct RawDatapoint(f64, SampleValue);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SampleValue {
    Number(f64),
    Text(String),
    Missing,
}

impl From<RawDatapoint> for Datapoint {
    fn from(raw: RawDatapoint) -> Self {
        let v = match raw.1 {
            SampleValue::Number(n) => n,
            // "NaN", "+Inf" and friends parse natively; anything else is dropped later
            SampleValue::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            SampleValue::Missing => f64::NAN,
        };
        Self { t: raw.0, v }
    }
}

// Values go out as strings, the way the metrics backend sends them.
impl From<Datapoint> for RawDatapoint {
    fn from(dp: Datapoint) -> Self {
        RawDatapoint(dp.t, SampleValue::Text(dp.v.to_string()))
    }
}

/// Ordered samples of one labeled series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub values: Vec<Datapoint>,
    #[serde(default)]
    pub label_set: LabelSet,
    /// Display name, assigned by the naming step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TimeSeries {
    pub fn new(values: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self { values: values.into_iter().map(Datapoint::from).collect(), label_set: LabelSet::new(), name: None }
    }

    pub fn with_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.label_set.insert(name.into(), value.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, or the empty string before naming.
    pub fn display_name(&self) -> &str { self.name.as_deref().unwrap_or("") }
}

/// Statistic key (e.g. "0.5", "avg") -> series; iteration keeps insertion order.
pub type Histogram = IndexMap<String, Vec<TimeSeries>>;

/// Rendering variant selected by the chart-type tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Bar,
    Scatter,
}

/// Per-variant drawing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindConfig {
    pub fill: bool,
    pub stroke: bool,
    /// Horizontal offset between grouped series, in pixels.
    pub group_offset: u32,
}

const KIND_TABLE: [(&str, ChartKind, KindConfig); 4] = [
    ("line", ChartKind::Line, KindConfig { fill: false, stroke: true, group_offset: 0 }),
    ("area", ChartKind::Area, KindConfig { fill: true, stroke: false, group_offset: 0 }),
    ("bar", ChartKind::Bar, KindConfig { fill: true, stroke: false, group_offset: 7 }),
    ("scatter", ChartKind::Scatter, KindConfig { fill: true, stroke: false, group_offset: 0 }),
];

impl ChartKind {
    pub fn config(self) -> KindConfig {
        KIND_TABLE.iter().find(|(_, k, _)| *k == self).map(|(_, _, c)| *c).unwrap_or(KIND_TABLE[0].2)
    }

    pub fn tag(self) -> &'static str {
        KIND_TABLE.iter().find(|(_, k, _)| *k == self).map(|(t, _, _)| *t).unwrap_or("line")
    }

    /// Style record for one series drawn with `color`.
    pub fn style(self, color: Color) -> SeriesStyle {
        let cfg = self.config();
        SeriesStyle {
            fill: cfg.fill.then_some(color),
            stroke: cfg.stroke.then_some(color),
        }
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KIND_TABLE
            .iter()
            .find(|(tag, _, _)| tag.eq_ignore_ascii_case(s.trim()))
            .map(|(_, k, _)| *k)
            .ok_or_else(|| ChartError::UnknownChartType(s.to_string()))
    }
}

/// Fill/stroke colors handed to the rendering collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
}

/// One chart of a dashboard, as supplied by the data-fetch layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Layout width on a 12-column grid.
    #[serde(default = "default_spans")]
    pub spans: u32,
    #[serde(default, alias = "metrics", skip_serializing_if = "Option::is_none")]
    pub metric: Option<Vec<TimeSeries>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub start_collapsed: bool,
}

fn default_spans() -> u32 { 12 }

impl ChartModel {
    pub fn new_metric(name: impl Into<String>, unit: impl Into<String>, series: Vec<TimeSeries>) -> Self {
        Self { name: name.into(), unit: unit.into(), spans: default_spans(), metric: Some(series), ..Self::default() }
    }

    pub fn new_histogram(name: impl Into<String>, unit: impl Into<String>, histogram: Histogram) -> Self {
        Self { name: name.into(), unit: unit.into(), spans: default_spans(), histogram: Some(histogram), ..Self::default() }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_chart_type(mut self, tag: impl Into<String>) -> Self {
        self.chart_type = Some(tag.into());
        self
    }

    /// Rendering variant; a missing tag means a line chart.
    pub fn kind(&self) -> Result<ChartKind, ChartError> {
        self.chart_type.as_deref().map_or(Ok(ChartKind::Line), |tag| tag.parse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datapoints_accept_numbers_strings_and_null() {
        let ts: TimeSeries = serde_json::from_str(
            r#"{"values":[[1,"2.5"],[2,3],[3,"NaN"],[4,null],[5,"garbage"]],"labelSet":{"app":"a"}}"#,
        ).unwrap();
        assert_eq!(ts.values[0], Datapoint::new(1.0, 2.5));
        assert_eq!(ts.values[1], Datapoint::new(2.0, 3.0));
        assert!(ts.values[2..].iter().all(|dp| dp.v.is_nan()));
        assert_eq!(ts.label_set["app"], "a");
    }

    #[test]
    fn datapoints_serialize_values_as_strings() {
        assert_eq!(serde_json::to_string(&Datapoint::new(123456.789, 50.0)).unwrap(), r#"[123456.789,"50"]"#);
        assert_eq!(serde_json::to_string(&Datapoint::new(123456.789, f64::NAN)).unwrap(), r#"[123456.789,"NaN"]"#);
        let back: Datapoint = serde_json::from_str(r#"[123456.789,"0.25"]"#).unwrap();
        assert_eq!(back, Datapoint::new(123456.789, 0.25));
    }

    #[test]
    fn kind_dispatch_table() {
        assert_eq!("Area".parse::<ChartKind>().unwrap(), ChartKind::Area);
        assert!(matches!("pie".parse::<ChartKind>(), Err(ChartError::UnknownChartType(t)) if t == "pie"));
        assert_eq!(ChartKind::Bar.config().group_offset, 7);
        let c = Color::from_rgb(1, 2, 3);
        assert_eq!(ChartKind::Line.style(c), SeriesStyle { fill: None, stroke: Some(c) });
        assert_eq!(ChartKind::Scatter.style(c), SeriesStyle { fill: Some(c), stroke: None });
    }

    #[test]
    fn chart_accepts_metrics_alias() {
        let chart: ChartModel = serde_json::from_str(
            r#"{"name":"c","unit":"bytes","metrics":[{"values":[[1,1]],"labelSet":{}}],"chartType":"bar"}"#,
        ).unwrap();
        assert_eq!(chart.metric.as_ref().map(Vec::len), Some(1));
        assert_eq!(chart.kind().unwrap(), ChartKind::Bar);
        assert_eq!(chart.spans, 12);
    }
}
