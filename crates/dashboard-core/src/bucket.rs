// File: crates/dashboard-core/src/bucket.rs
// Summary: Bucket aggregation of scattered points into fixed-width time buckets (box plots).

use serde::Serialize;
use tracing::trace;

use crate::point::{BucketPoint, LineInfo, RichPoint, XValue};

/// Group `points` into `bucket_count` equal-width buckets over `window`
/// (or over the points' own x range) and return the non-empty ones in
/// ascending x order.
///
/// Each bucket covers `[start, end]` with `end = start + size - 1` and is
/// drawn at its midpoint. Positions are floored to whole units (milliseconds
/// for time values). Points outside the window are dropped.
pub fn to_buckets(
    bucket_count: usize,
    points: &[RichPoint],
    template: &LineInfo,
    window: Option<(XValue, XValue)>,
) -> Vec<BucketPoint> {
    let Some(first) = points.first() else { return Vec::new() };
    if bucket_count == 0 { return Vec::new(); }

    let (min, max) = match window {
        Some((start, end)) => (start.as_f64(), end.as_f64()),
        None => points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            let x = p.x.as_f64();
            (lo.min(x), hi.max(x))
        }),
    };
    // +1 keeps the max point inside the last bucket instead of on its far edge
    let size = (1.0 + max - min) / bucket_count as f64;
    if !(size > 0.0) || !size.is_finite() {
        trace!(min, max, "empty or inverted bucket window");
        return Vec::new();
    }

    let mut acc: Vec<Vec<f64>> = vec![Vec::new(); bucket_count];
    for p in points {
        let idx = ((p.x.as_f64() - min) / size).floor();
        if idx >= 0.0 && idx < bucket_count as f64 {
            acc[idx as usize].push(p.y);
        }
    }

    let repr = first.x;
    let out: Vec<BucketPoint> = acc
        .into_iter()
        .enumerate()
        .filter(|(_, ys)| !ys.is_empty())
        .map(|(i, y)| {
            let start = (min + i as f64 * size).floor();
            BucketPoint {
                start: repr.same_repr(start),
                end: repr.same_repr((start + size - 1.0).floor()),
                x: repr.same_repr((start + size / 2.0).floor()),
                y,
                info: template.clone(),
            }
        })
        .collect();
    trace!(requested = bucket_count, emitted = out.len(), "bucketed points");
    out
}

/// Box-plot summary of one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BucketStats {
    pub min: f64,
    pub median: f64,
    pub max: f64,
    pub count: usize,
}

impl BucketPoint {
    /// Min, median (lower middle for even counts) and max of the bucket, or
    /// `None` for an empty bucket.
    pub fn stats(&self) -> Option<BucketStats> {
        if self.y.is_empty() { return None; }
        let mut sorted = self.y.clone();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        Some(BucketStats { min: sorted[0], median: sorted[(n - 1) / 2], max: sorted[n - 1], count: n })
    }

    /// Smallest value; the y position of the lower whisker.
    pub fn min_y(&self) -> f64 {
        self.y.iter().copied().fold(f64::INFINITY, f64::min)
    }
}
