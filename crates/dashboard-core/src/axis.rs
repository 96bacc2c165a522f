// File: crates/dashboard-core/src/axis.rs
// Summary: Axis models: time-axis tick density/format and the y-axis domain bounds.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::format_value;
use crate::series::ChartModel;

/// Tick count and strftime pattern for the time (x) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxisInfo {
    pub tick_count: usize,
    pub format: &'static str,
}

/// Pick tick density from the chart width, never exceeding the number of
/// points of the longest line.
pub fn time_axis_info(width: f64, max_points: usize) -> TimeAxisInfo {
    if width < 500.0 {
        TimeAxisInfo { tick_count: max_points.min(5), format: "%H:%M" }
    } else if width < 700.0 {
        TimeAxisInfo { tick_count: max_points.min(10), format: "%H:%M" }
    } else {
        TimeAxisInfo { tick_count: max_points.min(15), format: "%H:%M:%S" }
    }
}

/// Render a millisecond timestamp (UTC) with `format`. Out-of-range
/// instants and invalid patterns render as an empty label.
pub fn format_tick(ms: f64, format: &str) -> String {
    let Some(t) = DateTime::<Utc>::from_timestamp_millis(ms as i64) else {
        return String::new();
    };
    let mut out = String::new();
    match write!(out, "{}", t.format(format)) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

/// Dependent (y) axis: unit for tick labels plus optional fixed bounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueAxis {
    pub unit: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueAxis {
    pub fn for_chart(chart: &ChartModel) -> Self {
        Self { unit: chart.unit.clone(), min: chart.min, max: chart.max }
    }

    pub fn tick_label(&self, value: f64) -> String {
        format_value(&self.unit, value)
    }

    /// Clamp a data-derived domain to the configured bounds.
    pub fn domain(&self, data_min: f64, data_max: f64) -> (f64, f64) {
        (self.min.unwrap_or(data_min), self.max.unwrap_or(data_max))
    }
}
