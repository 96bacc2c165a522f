// File: crates/dashboard-core/src/locate.rs
// Summary: Nearest datapoint to a click position, measured in pixel space.

use crate::point::{BucketPoint, PlotPoint, RichPoint, XValue};
use crate::scale::LinearScale;

/// Anything that can be hit-tested on a chart.
pub trait Locatable {
    fn locate_x(&self) -> XValue;
    /// Y used for hit-testing; buckets use their lower whisker.
    fn locate_y(&self) -> f64;
}

impl Locatable for RichPoint {
    fn locate_x(&self) -> XValue { self.x }
    fn locate_y(&self) -> f64 { self.y }
}

impl Locatable for BucketPoint {
    fn locate_x(&self) -> XValue { self.x }
    fn locate_y(&self) -> f64 { self.min_y() }
}

impl Locatable for PlotPoint {
    fn locate_x(&self) -> XValue {
        self.x()
    }
    fn locate_y(&self) -> f64 {
        match self {
            PlotPoint::Raw(p) => p.locate_y(),
            PlotPoint::Bucket(b) => b.locate_y(),
        }
    }
}

/// Closest point to pixel `(px, py)` on a `width` x `height` chart.
///
/// `py` is a screen coordinate (growing downward). Each axis maps its own
/// data min..max onto the pixel size, and distance is Manhattan. Ties keep
/// the earliest point. Returns `None` for an empty set or a non-positive size.
pub fn find_closest<P: Locatable>(points: &[P], px: f64, py: f64, width: f64, height: f64) -> Option<&P> {
    if width <= 0.0 || height <= 0.0 || points.is_empty() {
        return None;
    }
    let sx = LinearScale::fit(points.iter().map(|p| p.locate_x().as_f64()), (0.0, width))?;
    let sy = LinearScale::fit(points.iter().map(Locatable::locate_y), (0.0, height))?;
    let screen_y = height - py;

    let mut best: Option<(&P, f64)> = None;
    for p in points {
        let dist = (sx.to_px(p.locate_x().as_f64()) - px).abs() + (sy.to_px(p.locate_y()) - screen_y).abs();
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((p, dist)),
        }
    }
    best.map(|(p, _)| p)
}
