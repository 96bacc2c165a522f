// File: crates/dashboard-core/src/point.rs
// Summary: Render-ready point, bucket, legend and line structures consumed by chart renderers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::color::Color;

/// X coordinate: either a point in time or a plain number.
///
/// Transforms keep the representation they were given, so a time axis stays
/// a time axis after bucketing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Time(DateTime<Utc>),
    Number(f64),
}

impl XValue {
    /// Time value from seconds since epoch, truncated to whole milliseconds.
    pub fn from_seconds(secs: f64) -> Self {
        Self::from_millis(secs * 1000.0)
    }

    /// Time value from milliseconds since epoch. Out-of-range instants fall
    /// back to a plain number so no sample is lost.
    pub fn from_millis(ms: f64) -> Self {
        let whole = ms.trunc();
        if !whole.is_finite() {
            return XValue::Number(ms);
        }
        match DateTime::<Utc>::from_timestamp_millis(whole as i64) {
            Some(t) => XValue::Time(t),
            None => XValue::Number(ms),
        }
    }

    /// Numeric position: milliseconds for time values.
    pub fn as_f64(&self) -> f64 {
        match self {
            XValue::Time(t) => t.timestamp_millis() as f64,
            XValue::Number(n) => *n,
        }
    }

    pub fn is_time(&self) -> bool { matches!(self, XValue::Time(_)) }

    /// Build a value at `pos` using the same representation as `self`.
    pub fn same_repr(&self, pos: f64) -> Self {
        if self.is_time() { Self::from_millis(pos) } else { XValue::Number(pos) }
    }
}

impl From<f64> for XValue {
    fn from(n: f64) -> Self { XValue::Number(n) }
}

impl From<DateTime<Utc>> for XValue {
    fn from(t: DateTime<Utc>) -> Self { XValue::Time(t) }
}

/// Per-line metadata copied into every point of that line.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInfo {
    pub name: String,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Multiplier applied to `y` for display; divide by it to recover the
    /// original value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_factor: Option<f64>,
}

impl LineInfo {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color, ..Self::default() }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn factor(&self) -> f64 { self.scale_factor.unwrap_or(1.0) }
}

/// A single plotted sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RichPoint {
    pub x: XValue,
    pub y: f64,
    #[serde(flatten)]
    pub info: LineInfo,
}

impl RichPoint {
    pub fn new(x: impl Into<XValue>, y: f64, info: LineInfo) -> Self {
        Self { x: x.into(), y, info }
    }

    /// Bare numeric point, mostly useful for hit-testing.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, LineInfo::default())
    }

    /// `y` with the display scale factor undone.
    pub fn original_y(&self) -> f64 { self.y / self.info.factor() }
}

/// Aggregate of raw values falling in `[start, end]`, drawn at `x`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketPoint {
    pub start: XValue,
    pub end: XValue,
    pub x: XValue,
    pub y: Vec<f64>,
    #[serde(flatten)]
    pub info: LineInfo,
}

/// Either kind of plotted point.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlotPoint {
    Raw(RichPoint),
    Bucket(BucketPoint),
}

impl PlotPoint {
    pub fn x(&self) -> XValue {
        match self {
            PlotPoint::Raw(p) => p.x,
            PlotPoint::Bucket(b) => b.x,
        }
    }

    pub fn info(&self) -> &LineInfo {
        match self {
            PlotPoint::Raw(p) => &p.info,
            PlotPoint::Bucket(b) => &b.info,
        }
    }

    /// Largest displayed value (the top whisker for buckets).
    pub fn max_y(&self) -> f64 {
        match self {
            PlotPoint::Raw(p) => p.y,
            PlotPoint::Bucket(b) => b.y.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl From<RichPoint> for PlotPoint {
    fn from(p: RichPoint) -> Self { PlotPoint::Raw(p) }
}

impl From<BucketPoint> for PlotPoint {
    fn from(b: BucketPoint) -> Self { PlotPoint::Bucket(b) }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendSymbol {
    pub fill: Color,
    /// Shape name ("circle", "star", ...); renderers default to a square.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Name plus symbol, used for display and show/hide toggling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendItem {
    pub name: String,
    pub symbol: LegendSymbol,
}

pub fn make_legend(name: impl Into<String>, color: Color, kind: Option<String>) -> LegendItem {
    LegendItem { name: name.into(), symbol: LegendSymbol { fill: color, kind } }
}

/// One render-ready line.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcLine<P = RichPoint> {
    pub points: Vec<P>,
    pub color: Option<Color>,
    pub legend_item: LegendItem,
}

impl<P> VcLine<P> {
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn name(&self) -> &str { &self.legend_item.name }
}
