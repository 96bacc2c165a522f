// File: crates/dashboard-core/src/scale.rs
// Summary: Linear domain -> pixel range transform used for hit-testing.

/// Domain value (timestamp in ms or plain number, or a y value).
pub type Value = f64;

/// Maps `[d0, d1]` linearly onto `[r0, r1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: Value,
    pub d1: Value,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    pub fn new(domain: (Value, Value), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// Scale spanning the min..max of `values`, or `None` when empty.
    pub fn fit<I: IntoIterator<Item = Value>>(values: I, range: (f64, f64)) -> Option<Self> {
        let (lo, hi) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo.is_finite() && hi.is_finite() { Some(Self::new((lo, hi), range)) } else { None }
    }

    /// Project a domain value. A zero-width domain maps everything to `r0`.
    #[inline]
    pub fn to_px(&self, v: Value) -> f64 {
        let span = self.d1 - self.d0;
        if span.abs() < 1e-12 {
            return self.r0;
        }
        self.r0 + (v - self.d0) / span * (self.r1 - self.r0)
    }
}
