// File: crates/dashboard-core/src/overlay.rs
// Summary: Auxiliary overlay series and their normalization onto the primary y-domain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bucket::to_buckets;
use crate::color::Color;
use crate::point::{make_legend, LineInfo, PlotPoint, RichPoint, VcLine, XValue};
use crate::series::{Datapoint, SeriesStyle};

/// A secondary series drawn on top of a chart, possibly on its own axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub title: String,
    #[serde(default)]
    pub unit: String,
    pub color: Color,
    #[serde(default)]
    pub data_style: SeriesStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// When set, points are aggregated into this many box-plot buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_count: Option<usize>,
    pub datapoints: Vec<Datapoint>,
}

impl Overlay {
    pub fn new(title: impl Into<String>, unit: impl Into<String>, color: Color, datapoints: Vec<Datapoint>) -> Self {
        Self {
            title: title.into(),
            unit: unit.into(),
            color,
            data_style: SeriesStyle { fill: Some(color), stroke: None },
            symbol: None,
            size: None,
            bucket_count: None,
            datapoints,
        }
    }

    pub fn with_buckets(mut self, count: usize) -> Self {
        self.bucket_count = Some(count);
        self
    }

    pub fn line_info(&self) -> LineInfo {
        LineInfo {
            name: self.title.clone(),
            color: self.color,
            unit: Some(self.unit.clone()),
            symbol: self.symbol.clone(),
            size: self.size,
            scale_factor: None,
        }
    }

    /// Samples as time points, NaN values dropped.
    pub fn raw_points(&self) -> Vec<RichPoint> {
        let info = self.line_info();
        self.datapoints
            .iter()
            .filter(|dp| !dp.v.is_nan())
            .map(|dp| RichPoint::new(XValue::from_seconds(dp.t), dp.v, info.clone()))
            .collect()
    }

    /// Render-ready line; bucketed over `window` when a bucket count is set.
    pub fn to_line(&self, window: Option<(XValue, XValue)>) -> VcLine<PlotPoint> {
        let raw = self.raw_points();
        let points = match self.bucket_count {
            Some(n) => to_buckets(n, &raw, &self.line_info(), window).into_iter().map(PlotPoint::from).collect(),
            None => raw.into_iter().map(PlotPoint::from).collect(),
        };
        VcLine { points, color: Some(self.color), legend_item: make_legend(&self.title, self.color, self.symbol.clone()) }
    }
}

/// When an overlay may share the primary y-axis.
///
/// Units must match and the scale factor must fall within
/// `[min_ratio, max_ratio]`. The bounds are a display choice, not a
/// numerical requirement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPolicy {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for AxisPolicy {
    fn default() -> Self { Self { min_ratio: 0.5, max_ratio: 2.0 } }
}

impl AxisPolicy {
    pub fn allows_shared(&self, same_unit: bool, factor: f64) -> bool {
        same_unit && factor >= self.min_ratio && factor <= self.max_ratio
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayAxis {
    Shared,
    Secondary,
}

/// Overlay rescaled for display, with the factor needed to invert it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedOverlay {
    pub factor: f64,
    pub axis: OverlayAxis,
    pub line: VcLine<PlotPoint>,
}

impl NormalizedOverlay {
    /// Undo the display scaling for a secondary-axis tick value.
    pub fn original_value(&self, displayed: f64) -> f64 { displayed / self.factor }
}

/// `primary_max / overlay_max`, or 1.0 when that is not a usable ratio.
pub fn overlay_factor(primary_max: f64, overlay_max: f64) -> f64 {
    if overlay_max == 0.0 || !overlay_max.is_finite() || !primary_max.is_finite() {
        return 1.0;
    }
    let f = primary_max / overlay_max;
    if f.is_finite() { f } else { 1.0 }
}

/// Largest y across all points of all lines.
pub fn max_y<'a>(lines: impl IntoIterator<Item = &'a VcLine>) -> f64 {
    lines.into_iter().flat_map(|l| l.points.iter()).map(|p| p.y).fold(f64::NEG_INFINITY, f64::max)
}

/// Rescale `overlay` so its maximum lines up with the primary maximum.
/// Every output point carries the applied factor.
pub fn normalize_overlay(
    primary: &[VcLine],
    primary_unit: &str,
    overlay: &VcLine<PlotPoint>,
    overlay_unit: &str,
    policy: &AxisPolicy,
) -> NormalizedOverlay {
    let primary_max = max_y(primary);
    let overlay_max = overlay.points.iter().map(PlotPoint::max_y).fold(f64::NEG_INFINITY, f64::max);
    let mut factor = overlay_factor(primary_max, overlay_max);
    let axis = if policy.allows_shared(primary_unit == overlay_unit, factor) {
        factor = 1.0;
        OverlayAxis::Shared
    } else {
        OverlayAxis::Secondary
    };
    debug!(primary_max, overlay_max, factor, ?axis, "normalized overlay");

    let points = overlay.points.iter().map(|p| scale_point(p, factor)).collect();
    NormalizedOverlay {
        factor,
        axis,
        line: VcLine { points, color: overlay.color, legend_item: overlay.legend_item.clone() },
    }
}

fn scale_point(p: &PlotPoint, factor: f64) -> PlotPoint {
    match p {
        PlotPoint::Raw(r) => {
            let mut r = r.clone();
            r.y *= factor;
            r.info.scale_factor = Some(factor);
            PlotPoint::Raw(r)
        }
        PlotPoint::Bucket(b) => {
            let mut b = b.clone();
            b.y.iter_mut().for_each(|y| *y *= factor);
            b.info.scale_factor = Some(factor);
            PlotPoint::Bucket(b)
        }
    }
}
