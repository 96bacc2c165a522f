// File: crates/dashboard-core/src/dashboard.rs
// Summary: Dashboard model, label aggregations and per-chart render state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::labels::{LabelSelection, Prettifier};
use crate::naming::generate_key;
use crate::options::DisplayOptions;
use crate::overlay::{normalize_overlay, NormalizedOverlay, Overlay};
use crate::palette::Palette;
use crate::point::{VcLine, XValue};
use crate::series::{ChartKind, ChartModel};
use crate::supply::DataSupplier;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardModel {
    pub title: String,
    #[serde(default)]
    pub charts: Vec<ChartModel>,
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
}

/// A label users may aggregate on, with its display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub label: String,
    pub display_name: String,
}

/// Deduplicate by display name (last one wins) and sort by display name.
pub fn unique_aggregations(aggs: impl IntoIterator<Item = Aggregation>) -> Vec<Aggregation> {
    let unique: BTreeMap<String, Aggregation> = aggs.into_iter().map(|a| (a.display_name.clone(), a)).collect();
    unique.into_values().collect()
}

impl DashboardModel {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Chart lookup by name, e.g. for an expanded single-chart view.
    pub fn chart(&self, name: &str) -> Option<&ChartModel> {
        self.charts.iter().find(|c| c.name == name)
    }

    /// Prepare every chart for one render pass.
    pub fn prepare(&self, selection: &LabelSelection, options: &DisplayOptions) -> Result<Vec<PreparedChart<'_>>> {
        let palette = options.palette()?;
        let charts = self
            .charts
            .iter()
            .map(|chart| PreparedChart::new(chart, ChartState::prepare(chart, selection, &palette, None)))
            .collect();
        debug!(dashboard = %self.title, charts = self.charts.len(), "prepared dashboard");
        Ok(charts)
    }
}

/// What a chart shows for this render pass.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartState {
    /// The data-fetch layer reported an error; nothing was transformed.
    Error(String),
    /// No line has any point.
    Empty,
    Ready(Vec<VcLine>),
}

impl ChartState {
    pub fn prepare(
        chart: &ChartModel,
        selection: &LabelSelection,
        palette: &Palette,
        prettifier: Option<Prettifier<'_>>,
    ) -> Self {
        if let Some(err) = &chart.error {
            warn!(chart = %chart.name, error = %err, "chart has a fetch error");
            return ChartState::Error(err.clone());
        }
        let mut supplier = DataSupplier::new(chart, selection, palette);
        if let Some(p) = prettifier {
            supplier = supplier.with_prettifier(p);
        }
        let lines = supplier.supply();
        if lines.iter().all(VcLine::is_empty) {
            ChartState::Empty
        } else {
            ChartState::Ready(lines)
        }
    }

    pub fn lines(&self) -> &[VcLine] {
        match self {
            ChartState::Ready(lines) => lines,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool { matches!(self, ChartState::Error(_)) }
    pub fn is_empty(&self) -> bool { matches!(self, ChartState::Empty) }
}

/// A chart together with its derived state for one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedChart<'a> {
    pub chart: &'a ChartModel,
    pub key: String,
    pub kind: ChartKind,
    pub collapsed: bool,
    pub state: ChartState,
}

impl<'a> PreparedChart<'a> {
    pub fn new(chart: &'a ChartModel, state: ChartState) -> Self {
        let kind = chart.kind().unwrap_or_else(|e| {
            warn!(chart = %chart.name, error = %e, "falling back to line chart");
            ChartKind::Line
        });
        let collapsed = chart.start_collapsed || state.is_empty();
        Self { chart, key: chart_key(chart), kind, collapsed, state }
    }

    /// Time range covered by the chart's lines.
    pub fn time_window(&self) -> Option<(XValue, XValue)> {
        let mut points = self.state.lines().iter().flat_map(|l| l.points.iter());
        let first = points.next()?;
        let (lo, hi) = points.fold((first.x, first.x), |(lo, hi), p| {
            (if p.x.as_f64() < lo.as_f64() { p.x } else { lo }, if p.x.as_f64() > hi.as_f64() { p.x } else { hi })
        });
        Some((lo, hi))
    }

    /// Normalize `overlay` against this chart, bucketing it over the chart's
    /// time window when a bucket count applies. `None` unless the chart is
    /// ready to render.
    pub fn overlay(&self, overlay: &Overlay, options: &DisplayOptions) -> Option<NormalizedOverlay> {
        let ChartState::Ready(lines) = &self.state else { return None };
        let mut overlay = overlay.clone();
        if overlay.bucket_count.is_none() {
            overlay.bucket_count = options.overlay_buckets;
        }
        let line = overlay.to_line(self.time_window());
        Some(normalize_overlay(lines, &self.chart.unit, &line, &overlay.unit, &options.overlay_policy))
    }
}

fn chart_key(chart: &ChartModel) -> String {
    match (&chart.metric, &chart.histogram) {
        (Some(metric), _) => generate_key(metric, &chart.name),
        (None, Some(histogram)) => generate_key(histogram.values().next().map_or(&[][..], |s| s.as_slice()), &chart.name),
        (None, None) => generate_key(&[], &chart.name),
    }
}
