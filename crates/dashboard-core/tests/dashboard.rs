// File: crates/dashboard-core/tests/dashboard.rs
// Purpose: Dashboard JSON loading, per-chart state, collapse rules and aggregations.

use dashboard_core::dashboard::{unique_aggregations, Aggregation};
use dashboard_core::{
    convert_matrix, ChartKind, ChartModel, ChartState, Color, ConversionParams, Datapoint, DashboardModel,
    DisplayOptions, LabelSelection, Overlay, OverlayAxis, QueryResult, SortAs, TimeSeries,
};
use indexmap::IndexMap;

const DASHBOARD: &str = r#"{
  "title": "Service overview",
  "charts": [
    {
      "name": "Requests",
      "unit": "ops",
      "metrics": [
        {"values": [[1556802000, "10"], [1556802060, "20"]], "labelSet": {"code": "200"}},
        {"values": [[1556802000, "1"], [1556802060, "NaN"]], "labelSet": {"code": "500"}}
      ],
      "chartType": "bar"
    },
    {
      "name": "Latency",
      "unit": "seconds",
      "histogram": {
        "avg": [{"values": [[1556802000, 0.2]], "labelSet": {}}],
        "0.99": [{"values": [[1556802000, 0.9]], "labelSet": {}}]
      },
      "startCollapsed": true
    },
    {"name": "Broken", "error": "backend timed out"},
    {"name": "Quiet", "metrics": [{"values": [[1556802000, "NaN"]], "labelSet": {}}]},
    {"name": "Odd", "metrics": [{"values": [[1, 1]]}], "chartType": "pie"}
  ],
  "aggregations": [
    {"label": "code", "displayName": "Status"},
    {"label": "app", "displayName": "Application"},
    {"label": "status_code", "displayName": "Status"}
  ]
}"#;

fn model() -> DashboardModel {
    DashboardModel::from_json_str(DASHBOARD).unwrap()
}

#[test]
fn prepares_each_chart() {
    let model = model();
    let prepared = model.prepare(&LabelSelection::new(), &DisplayOptions::default()).unwrap();
    assert_eq!(prepared.len(), 5);

    let requests = &prepared[0];
    assert_eq!(requests.kind, ChartKind::Bar);
    assert_eq!(requests.key, "Requests-code");
    assert!(!requests.collapsed);
    let names: Vec<&str> = requests.state.lines().iter().map(|l| l.name()).collect();
    assert_eq!(names, ["200", "500"]);
    assert_eq!(requests.state.lines()[1].points.len(), 1);

    let latency = &prepared[1];
    assert!(latency.collapsed);
    let names: Vec<&str> = latency.state.lines().iter().map(|l| l.name()).collect();
    assert_eq!(names, ["avg", "p99"]);
}

#[test]
fn error_short_circuits() {
    let model = model();
    let prepared = model.prepare(&LabelSelection::new(), &DisplayOptions::default()).unwrap();
    let broken = &prepared[2];
    assert_eq!(broken.state, ChartState::Error("backend timed out".into()));
    assert!(broken.state.lines().is_empty());
    assert!(!broken.collapsed);
    assert_eq!(broken.key, "blank");
}

#[test]
fn all_nan_chart_is_empty_and_collapsed() {
    let model = model();
    let prepared = model.prepare(&LabelSelection::new(), &DisplayOptions::default()).unwrap();
    assert!(prepared[3].state.is_empty());
    assert!(prepared[3].collapsed);
    assert_eq!(prepared[3].key, "Quiet");
}

#[test]
fn unknown_chart_type_falls_back_to_line() {
    let model = model();
    assert!(model.chart("Odd").unwrap().kind().is_err());
    let prepared = model.prepare(&LabelSelection::new(), &DisplayOptions::default()).unwrap();
    assert_eq!(prepared[4].kind, ChartKind::Line);
}

#[test]
fn selection_applies_to_all_charts() {
    let model = model();
    let selection = LabelSelection::new().with("code", "500", false);
    let prepared = model.prepare(&selection, &DisplayOptions::default()).unwrap();
    assert_eq!(prepared[0].state.lines().len(), 1);
}

#[test]
fn custom_palette_from_options() {
    let model = model();
    let options = DisplayOptions::from_toml_str("colors = [\"#123456\"]").unwrap();
    let prepared = model.prepare(&LabelSelection::new(), &options).unwrap();
    let expected: Color = "#123456".parse().unwrap();
    assert!(prepared[0].state.lines().iter().all(|l| l.color == Some(expected)));
}

#[test]
fn bad_palette_is_an_error() {
    let options = DisplayOptions { colors: Some(vec!["not-a-color".into()]), ..DisplayOptions::default() };
    assert!(model().prepare(&LabelSelection::new(), &options).is_err());
}

#[test]
fn overlay_buckets_over_chart_window() {
    let model = model();
    let options = DisplayOptions { overlay_buckets: Some(1), ..DisplayOptions::default() };
    let prepared = model.prepare(&LabelSelection::new(), &options).unwrap();
    let requests = &prepared[0];
    let (lo, hi) = requests.time_window().unwrap();
    assert_eq!((lo.as_f64(), hi.as_f64()), (1_556_802_000_000.0, 1_556_802_060_000.0));

    let overlay = Overlay::new(
        "cpu",
        "%",
        Color::from_rgb(9, 9, 9),
        vec![Datapoint::new(1_556_802_000.0, 5.0), Datapoint::new(1_556_802_030.0, 10.0), Datapoint::new(1_556_803_000.0, 99.0)],
    );
    let normalized = requests.overlay(&overlay, &options).unwrap();
    assert_eq!(normalized.axis, OverlayAxis::Secondary);
    assert_eq!(normalized.factor, 2.0);
    assert_eq!(normalized.line.points.len(), 1);

    assert!(prepared[2].overlay(&overlay, &options).is_none());
}

#[test]
fn aggregations_dedupe_by_display_name() {
    let unique = unique_aggregations(model().aggregations);
    let names: Vec<(&str, &str)> = unique.iter().map(|a| (a.display_name.as_str(), a.label.as_str())).collect();
    assert_eq!(names, [("Application", "app"), ("Status", "status_code")]);
}

#[test]
fn aggregation_json_is_camel_case() {
    let a = Aggregation { label: "code".into(), display_name: "Status".into() };
    assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"label":"code","displayName":"Status"}"#);
}

fn counter(key: &str, value: f64) -> TimeSeries {
    TimeSeries::new([(1_556_802_000.0, value)]).with_label("key", key)
}

fn keyed(values: &[(&str, f64)]) -> QueryResult {
    QueryResult::ok(values.iter().map(|&(k, v)| counter(k, v)).collect())
}

fn summary(chart: &ChartModel) -> Vec<(Option<String>, f64)> {
    chart
        .metric
        .iter()
        .flatten()
        .map(|ts| (ts.label_set.get("key").cloned(), ts.values[0].v))
        .collect()
}

fn owned(pairs: &[(&str, f64)]) -> Vec<(Option<String>, f64)> {
    pairs.iter().map(|&(k, v)| (Some(k.to_string()), v)).collect()
}

#[test]
fn empty_matrix_converts_to_empty() {
    assert!(convert_matrix(&[], &ConversionParams::scaled(0.0)).is_empty());
}

#[test]
fn metric_values_are_scaled() {
    let mut chart = ChartModel::default();
    chart.fill_metric("foo", &QueryResult::ok(vec![TimeSeries::new([(1.0, 10.0)])]), &ConversionParams::scaled(2.0));
    assert!(chart.error.is_none());
    let series = chart.metric.as_ref().unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].values[0].v, 20.0);
}

#[test]
fn failed_metric_records_error() {
    let mut chart = ChartModel::default();
    chart.fill_metric("foo", &QueryResult::default(), &ConversionParams::default());
    assert!(chart.error.is_none());
    assert!(chart.metric.iter().flatten().next().is_none());

    let mut chart = ChartModel::default();
    chart.fill_metric("foo", &QueryResult::failed("Some error"), &ConversionParams::default());
    assert_eq!(chart.error.as_deref(), Some("error in metric foo: Some error"));
    assert!(chart.metric.iter().flatten().next().is_none());
}

#[test]
fn histogram_stats_are_scaled() {
    let mut results = IndexMap::new();
    results.insert("0.99".to_string(), QueryResult::ok(vec![TimeSeries::new([(1.0, 15.0)])]));
    results.insert("avg".to_string(), QueryResult::ok(vec![TimeSeries::new([(1.0, 10.0)])]));
    let mut chart = ChartModel::default();
    chart.fill_histogram("foo", &results, &ConversionParams::scaled(2.0));
    assert!(chart.error.is_none());
    let histogram = chart.histogram.as_ref().unwrap();
    let stats: Vec<(&str, f64)> = histogram.iter().map(|(k, s)| (k.as_str(), s[0].values[0].v)).collect();
    assert_eq!(stats, [("0.99", 30.0), ("avg", 20.0)]);
}

#[test]
fn failed_histogram_stat_records_error() {
    let mut results = IndexMap::new();
    results.insert("0.99".to_string(), QueryResult::default());
    let mut chart = ChartModel::default();
    chart.fill_histogram("foo", &results, &ConversionParams::default());
    assert!(chart.error.is_none());
    assert!(chart.histogram.iter().flat_map(|h| h.values()).next().is_none());

    results.insert("0.99".to_string(), QueryResult::failed("Some error"));
    let mut chart = ChartModel::default();
    chart.fill_histogram("foo", &results, &ConversionParams::default());
    assert_eq!(chart.error.as_deref(), Some("error in metric foo/0.99: Some error"));
    assert!(chart.histogram.is_none());
}

#[test]
fn unsorted_matrix_keeps_fetch_order() {
    let mut chart = ChartModel::default();
    chart.fill_metric("foo", &keyed(&[("v1", 1.0), ("v2", 2.0), ("v10", 3.0)]), &ConversionParams::default());
    assert_eq!(summary(&chart), owned(&[("v1", 1.0), ("v2", 2.0), ("v10", 3.0)]));
}

#[test]
fn sort_label_compares_as_strings() {
    let mut chart = ChartModel::default();
    let params = ConversionParams::default().sorted_by("key", SortAs::String);
    chart.fill_metric("foo", &keyed(&[("v1", 1.0), ("v2", 2.0), ("v10", 3.0)]), &params);
    assert_eq!(summary(&chart), owned(&[("v1", 1.0), ("v10", 3.0), ("v2", 2.0)]));
}

#[test]
fn sort_label_can_be_removed() {
    let mut chart = ChartModel::default();
    let params = ConversionParams::default().sorted_by("key", SortAs::String).removing_sort_label();
    chart.fill_metric("foo", &keyed(&[("v1", 1.0), ("v2", 2.0), ("v10", 3.0)]), &params);
    let expected: Vec<(Option<String>, f64)> = vec![(None, 1.0), (None, 3.0), (None, 2.0)];
    assert_eq!(summary(&chart), expected);
    assert!(chart.metric.iter().flatten().all(|ts| ts.label_set.is_empty()));
}

#[test]
fn unknown_sort_label_keeps_order_and_labels() {
    let mut chart = ChartModel::default();
    let params = ConversionParams::default().sorted_by("not-found", SortAs::String).removing_sort_label();
    chart.fill_metric("foo", &keyed(&[("v1", 1.0), ("v2", 2.0), ("v10", 3.0)]), &params);
    assert_eq!(summary(&chart), owned(&[("v1", 1.0), ("v2", 2.0), ("v10", 3.0)]));
}

#[test]
fn sort_label_compares_as_ints() {
    let mut chart = ChartModel::default();
    let params = ConversionParams::default().sorted_by("key", SortAs::Int);
    chart.fill_metric("foo", &keyed(&[("1", 1.0), ("10", 2.0), ("2", 3.0)]), &params);
    assert_eq!(summary(&chart), owned(&[("1", 1.0), ("2", 3.0), ("10", 2.0)]));
}

#[test]
fn converted_chart_feeds_the_pipeline() {
    let mut chart = ChartModel::new_metric("Requests", "ops", Vec::new());
    let params = ConversionParams::default().sorted_by("key", SortAs::Int);
    chart.fill_metric("requests_total", &keyed(&[("10", 1.0), ("2", 2.0)]), &params);
    let state = ChartState::prepare(&chart, &LabelSelection::new(), &Default::default(), None);
    let names: Vec<&str> = state.lines().iter().map(|l| l.name()).collect();
    assert_eq!(names, ["2", "10"]);
}
