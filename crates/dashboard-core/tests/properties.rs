// File: crates/dashboard-core/tests/properties.rs
// Purpose: Property tests for visibility filtering, bucketing and naming.

use dashboard_core::naming::name_metric_series;
use dashboard_core::{is_visible, to_buckets, LabelSelection, LabelSet, LineInfo, RichPoint, TimeSeries};
use proptest::prelude::*;

fn label_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-c]", "[x-z]"), 0..4)
}

proptest! {
    #[test]
    fn hidden_iff_explicit_false(
        labels in label_pairs(),
        entries in prop::collection::vec(("[a-c]", "[x-z]", any::<bool>()), 0..6),
    ) {
        let set: LabelSet = labels.into_iter().collect();
        let mut selection = LabelSelection::new();
        for (label, value, selected) in &entries {
            selection.set(label.as_str(), value.as_str(), *selected);
        }
        let explicitly_off = set.iter().any(|(name, value)| {
            selection.values_of(name).and_then(|v| v.get(value)) == Some(&false)
        });
        prop_assert_eq!(is_visible(&set, &selection), !explicitly_off);
    }

    #[test]
    fn buckets_keep_every_point(
        raw in prop::collection::vec((0u32..100_000, -1000i32..1000), 1..200),
        count in 1usize..50,
    ) {
        let points: Vec<RichPoint> = raw.iter().map(|&(x, y)| RichPoint::at(x as f64, y as f64)).collect();
        let buckets = to_buckets(count, &points, &LineInfo::default(), None);

        prop_assert!(buckets.len() <= count);
        let total: usize = buckets.iter().map(|b| b.y.len()).sum();
        prop_assert_eq!(total, points.len());
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].start.as_f64() <= pair[1].start.as_f64());
        }
        for b in &buckets {
            prop_assert!(!b.y.is_empty());
            prop_assert!(b.start.as_f64() <= b.x.as_f64());
        }
    }

    #[test]
    fn metric_names_join_label_values(values in prop::collection::vec("[a-z]{1,6}", 1..4)) {
        let mut ts = TimeSeries::new([(1.0, 1.0)]);
        for (i, v) in values.iter().enumerate() {
            ts = ts.with_label(format!("l{i}"), v.as_str());
        }
        let named = name_metric_series("chart", [&ts], None);
        prop_assert_eq!(named[0].display_name().to_string(), values.join(","));
    }
}
