// File: crates/dashboard-core/src/supply.rs
// Summary: Data supplier: filtered, named series -> render-ready lines with colors and legends.

use tracing::{debug, trace};

use crate::color::Color;
use crate::labels::{LabelSelection, Prettifier};
use crate::naming::{filter_and_name_histogram, filter_and_name_metric};
use crate::palette::{ColorCursor, Palette};
use crate::point::{make_legend, LineInfo, RichPoint, VcLine, XValue};
use crate::series::{ChartModel, TimeSeries};

/// Converts one chart into lines. Re-invocable: each [`DataSupplier::supply`]
/// call starts coloring from the first palette entry.
pub struct DataSupplier<'a> {
    chart: &'a ChartModel,
    selection: &'a LabelSelection,
    palette: &'a Palette,
    prettifier: Option<Prettifier<'a>>,
}

impl<'a> DataSupplier<'a> {
    pub fn new(chart: &'a ChartModel, selection: &'a LabelSelection, palette: &'a Palette) -> Self {
        Self { chart, selection, palette, prettifier: None }
    }

    pub fn with_prettifier(mut self, prettifier: Prettifier<'a>) -> Self {
        self.prettifier = Some(prettifier);
        self
    }

    pub fn supply(&self) -> Vec<VcLine> {
        let mut cursor = self.palette.cursor();
        let unit = self.chart.unit.as_str();
        let lines = if let Some(metric) = &self.chart.metric {
            let named = filter_and_name_metric(&self.chart.name, metric, self.selection, self.prettifier);
            to_lines(&named, unit, &mut cursor)
        } else if let Some(histogram) = &self.chart.histogram {
            let named = filter_and_name_histogram(histogram, self.selection, self.prettifier);
            // Flat-map stat x series; colors keep rotating across stats.
            named.values().flat_map(|series| to_lines(series, unit, &mut cursor)).collect()
        } else {
            Vec::new()
        };
        debug!(chart = %self.chart.name, lines = lines.len(), "supplied chart lines");
        lines
    }
}

/// One-shot helper around [`DataSupplier`].
pub fn supply(chart: &ChartModel, selection: &LabelSelection, palette: &Palette) -> Vec<VcLine> {
    DataSupplier::new(chart, selection, palette).supply()
}

fn to_lines(series: &[TimeSeries], unit: &str, cursor: &mut ColorCursor<'_>) -> Vec<VcLine> {
    series.iter().map(|ts| to_line(ts, unit, cursor.next_color())).collect()
}

fn to_line(ts: &TimeSeries, unit: &str, color: Color) -> VcLine {
    let name = ts.display_name();
    let info = LineInfo::new(name, color).with_unit(unit);
    let points: Vec<RichPoint> = ts
        .values
        .iter()
        .filter(|dp| !dp.v.is_nan())
        .map(|dp| RichPoint::new(XValue::from_seconds(dp.t), dp.v, info.clone()))
        .collect();
    let dropped = ts.values.len() - points.len();
    if dropped > 0 {
        trace!(series = name, dropped, "dropped NaN samples");
    }
    VcLine { points, color: Some(color), legend_item: make_legend(name, color, None) }
}
