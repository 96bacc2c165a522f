// File: crates/dashboard-core/src/view.rs
// Summary: Immutable per-chart view state (width, hidden series) and the layout derived from it.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::axis::{time_axis_info, TimeAxisInfo};
use crate::color::Color;
use crate::legend::{estimate_legend, LegendInfo};
use crate::point::{LegendItem, LegendSymbol, PlotPoint, VcLine};
use crate::series::{ChartKind, SeriesStyle};
use crate::types::{Insets, CHART_BASE_HEIGHT, HIDDEN_SERIES_FILL, OVERLAY_AXIS_PADDING};

/// User interaction on a chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    Resize(f64),
    /// Legend click on line `idx`; the overlay, if any, comes after the lines.
    ToggleSeries(usize),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartView {
    width: f64,
    hidden: BTreeSet<usize>,
    kind: ChartKind,
}

impl ChartView {
    pub fn new(width: f64) -> Self {
        Self { width, hidden: BTreeSet::new(), kind: ChartKind::Line }
    }

    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn kind(&self) -> ChartKind { self.kind }
    pub fn is_hidden(&self, idx: usize) -> bool { self.hidden.contains(&idx) }
    pub fn hidden(&self) -> impl Iterator<Item = usize> + '_ { self.hidden.iter().copied() }

    /// Next state after `event`; `self` is left untouched.
    pub fn apply(&self, event: ViewEvent) -> Self {
        let mut next = self.clone();
        match event {
            ViewEvent::Resize(width) => next.width = width.max(0.0),
            ViewEvent::ToggleSeries(idx) => {
                if !next.hidden.remove(&idx) {
                    next.hidden.insert(idx);
                }
            }
        }
        next
    }

    /// Visible lines with their original indices.
    pub fn visible_lines<'l, P>(&'l self, lines: &'l [VcLine<P>]) -> impl Iterator<Item = (usize, &'l VcLine<P>)> + 'l {
        lines.iter().enumerate().filter(move |(idx, _)| !self.is_hidden(*idx))
    }

    /// Derive everything a renderer needs for the current state.
    pub fn layout(&self, lines: &[VcLine], overlay: Option<&VcLine<PlotPoint>>) -> ChartLayout {
        let overlay_idx = lines.len();
        let show_overlay = overlay.is_some() && !self.is_hidden(overlay_idx);

        let mut items: Vec<&LegendItem> = lines.iter().map(|l| &l.legend_item).collect();
        if let Some(o) = overlay {
            items.push(&o.legend_item);
        }
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        let legend = estimate_legend(&names, self.width);

        let grey: Color = HIDDEN_SERIES_FILL.parse().unwrap_or_default();
        let legend_items = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                if self.is_hidden(idx) {
                    LegendItem { name: item.name.clone(), symbol: LegendSymbol { fill: grey, kind: None } }
                } else {
                    item.clone()
                }
            })
            .collect();

        let overlay_pad = if show_overlay { OVERLAY_AXIS_PADDING } else { 0 };
        let defaults = Insets::default();
        let padding = Insets::new(
            defaults.left,
            defaults.right + overlay_pad,
            defaults.top,
            defaults.bottom + legend.height as u32,
        );

        let max_points = lines.iter().map(|l| l.points.len()).max().unwrap_or(0);
        ChartLayout {
            height: CHART_BASE_HEIGHT + legend.height,
            legend,
            legend_items,
            padding,
            show_overlay,
            group_offset: self.kind.config().group_offset,
            visible: self.visible_lines(lines).map(|(idx, _)| idx).collect(),
            time_axis: time_axis_info(self.width, max_points),
        }
    }
}

/// Layout derived from a [`ChartView`] and the chart's lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub height: f64,
    pub legend: LegendInfo,
    /// Lines then overlay; hidden entries are greyed out.
    pub legend_items: Vec<LegendItem>,
    #[serde(skip)]
    pub padding: Insets,
    pub show_overlay: bool,
    /// Horizontal shift between grouped series, in pixels (bars only).
    pub group_offset: u32,
    pub visible: Vec<usize>,
    pub time_axis: TimeAxisInfo,
}

impl ChartLayout {
    /// Fill/stroke of each visible line for the given chart variant.
    pub fn styles(&self, kind: ChartKind, lines: &[VcLine]) -> Vec<SeriesStyle> {
        self.visible
            .iter()
            .filter_map(|&idx| lines.get(idx))
            .map(|l| kind.style(l.color.unwrap_or(l.legend_item.symbol.fill)))
            .collect()
    }
}
