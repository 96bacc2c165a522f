// File: crates/dashboard-core/src/types.rs
// Summary: Shared types and constants (chart heights, paddings, reserved labels).

/// Label that never contributes to a series display name.
pub const RESERVED_LABEL: &str = "reporter";

/// Plot height in pixels, before the legend is added below it.
pub const CHART_BASE_HEIGHT: f64 = 300.0;

/// Extra right padding reserved for the secondary (overlay) axis.
pub const OVERLAY_AXIS_PADDING: u32 = 30;

/// Legend symbol fill used for series the user has hidden.
pub const HIDDEN_SERIES_FILL: &str = "#72767b";

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(40, 10, 10, 20)
    }
}
