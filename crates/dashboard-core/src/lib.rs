// File: crates/dashboard-core/src/lib.rs
// Summary: Core library entry point; exports the data-shaping pipeline for dashboard charts.

pub mod axis;
pub mod bucket;
pub mod color;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod labels;
pub mod legend;
pub mod locate;
pub mod naming;
pub mod options;
pub mod overlay;
pub mod palette;
pub mod point;
pub mod scale;
pub mod series;
pub mod supply;
pub mod types;
pub mod view;

pub use axis::{time_axis_info, TimeAxisInfo, ValueAxis};
pub use bucket::{to_buckets, BucketStats};
pub use color::Color;
pub use convert::{convert_matrix, ConversionParams, QueryResult, SortAs};
pub use dashboard::{ChartState, DashboardModel, PreparedChart};
pub use error::{ChartError, Result};
pub use format::{format_value, tooltip_label};
pub use labels::{is_visible, LabelSelection, LabelSet};
pub use legend::{estimate_legend, LegendInfo};
pub use locate::{find_closest, Locatable};
pub use options::DisplayOptions;
pub use overlay::{normalize_overlay, AxisPolicy, NormalizedOverlay, Overlay, OverlayAxis};
pub use palette::Palette;
pub use point::{BucketPoint, LegendItem, LineInfo, PlotPoint, RichPoint, VcLine, XValue};
pub use series::{ChartKind, ChartModel, Datapoint, Histogram, SeriesStyle, TimeSeries};
pub use supply::{supply, DataSupplier};
pub use view::{ChartLayout, ChartView, ViewEvent};
