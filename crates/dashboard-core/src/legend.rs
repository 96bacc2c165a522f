// File: crates/dashboard-core/src/legend.rs
// Summary: Legend height and row layout estimated from item name lengths.

use serde::Serialize;

/// Pixels reserved per legend row.
pub const LEGEND_ROW_HEIGHT: f64 = 30.0;
/// Constant margin added to the legend height.
pub const LEGEND_MARGIN: f64 = 15.0;

/// (minimum longest-name length in chars, box width in px), highest first.
const BOX_SIZES: [(usize, f64); 3] = [(30, 400.0), (20, 300.0), (10, 200.0)];
const DEFAULT_BOX_SIZE: f64 = 110.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendInfo {
    pub height: f64,
    pub items_per_row: usize,
}

/// Width budgeted per legend item, from the longest name in characters.
pub fn box_size<S: AsRef<str>>(names: &[S]) -> f64 {
    let longest = names.iter().map(|n| n.as_ref().chars().count()).max().unwrap_or(0);
    BOX_SIZES
        .iter()
        .find(|(min_len, _)| longest >= *min_len)
        .map_or(DEFAULT_BOX_SIZE, |(_, size)| *size)
}

/// Estimate legend layout for `names` in `width` pixels.
pub fn estimate_legend<S: AsRef<str>>(names: &[S], width: f64) -> LegendInfo {
    let per_row = (width / box_size(names)).floor();
    let items_per_row = if per_row >= 1.0 { per_row as usize } else { 1 };
    let rows = names.len().div_ceil(items_per_row);
    LegendInfo { height: LEGEND_MARGIN + LEGEND_ROW_HEIGHT * rows as f64, items_per_row }
}
