// File: crates/demo/src/main.rs
// Summary: Demo loads a dashboard JSON, optional display options and an overlay CSV, then prints
// what a renderer would draw for each chart (lines, legend, overlay axis, hit-test, tooltips).

use anyhow::{Context, Result};
use dashboard_core::dashboard::unique_aggregations;
use dashboard_core::{
    find_closest, tooltip_label, ChartView, Color, DashboardModel, Datapoint, DisplayOptions, LabelSelection,
    Overlay, PlotPoint, PreparedChart, ValueAxis, ViewEvent,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SAMPLE_DASHBOARD: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_dashboard.json");

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // dashboard-demo [dashboard.json] [options.toml] [overlay.csv]
    let mut args = std::env::args().skip(1);
    let dashboard_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(SAMPLE_DASHBOARD));
    let options_path = args.next().map(PathBuf::from);
    let overlay_path = args.next().map(PathBuf::from);

    let raw = std::fs::read_to_string(&dashboard_path)
        .with_context(|| format!("reading dashboard '{}'", dashboard_path.display()))?;
    let model = DashboardModel::from_json_str(&raw)
        .with_context(|| format!("parsing dashboard '{}'", dashboard_path.display()))?;
    println!("Dashboard: {} ({} charts)", model.title, model.charts.len());

    let options = match &options_path {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading options '{}'", p.display()))?;
            DisplayOptions::from_toml_str(&text).with_context(|| format!("invalid options '{}'", p.display()))?
        }
        None => DisplayOptions::default(),
    };
    info!(palette = %options.palette, width = options.width, "display options loaded");

    let overlay = overlay_path.as_deref().map(load_overlay_csv).transpose()?;

    for agg in unique_aggregations(model.aggregations.clone()) {
        println!("Aggregate by: {} ({})", agg.display_name, agg.label);
    }

    let prepared = model.prepare(&LabelSelection::new(), &options)?;
    for chart in &prepared {
        describe_chart(chart, overlay.as_ref(), &options);
    }
    Ok(())
}

fn describe_chart(chart: &PreparedChart<'_>, overlay: Option<&Overlay>, options: &DisplayOptions) {
    println!();
    println!("== {} [{}] key={} kind={}", chart.chart.name, chart.chart.unit, chart.key, chart.kind.tag());
    if chart.state.is_error() {
        println!("  error: {:?}", chart.state);
        return;
    }
    if chart.collapsed {
        println!("  (collapsed)");
    }
    let lines = chart.state.lines();
    if lines.is_empty() {
        println!("  no data");
        return;
    }

    let axis = ValueAxis::for_chart(chart.chart);
    for line in lines {
        let (lo, hi) = line.points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let (lo, hi) = axis.domain(lo, hi);
        println!(
            "  line '{}' color={} points={} range {} .. {}",
            line.name(),
            line.color.map(|c| c.to_string()).unwrap_or_default(),
            line.points.len(),
            axis.tick_label(lo),
            axis.tick_label(hi),
        );
    }

    let normalized = overlay.and_then(|o| chart.overlay(o, options));
    if let Some(n) = &normalized {
        println!("  overlay '{}' axis={:?} factor={:.3} points={}", n.line.name(), n.axis, n.factor, n.line.points.len());
        if let Some(p) = n.line.points.first() {
            println!("    first: {}", tooltip_label(p));
        }
    }

    let view = ChartView::new(options.width).with_kind(chart.kind);
    let layout = view.layout(lines, normalized.as_ref().map(|n| &n.line));
    println!(
        "  layout height={} legend rows of {} ({}px) ticks={} '{}' group offset={}px",
        layout.height,
        layout.legend.items_per_row,
        layout.legend.height,
        layout.time_axis.tick_count,
        layout.time_axis.format,
        layout.group_offset
    );
    for (style, idx) in layout.styles(chart.kind, lines).iter().zip(&layout.visible) {
        println!("    style[{idx}] fill={:?} stroke={:?}", style.fill.map(|c| c.to_string()), style.stroke.map(|c| c.to_string()));
    }

    // Simulate a click in the middle of the plot area of the first line.
    let plot_w = options.width - f64::from(layout.padding.hsum());
    let plot_h = layout.height - f64::from(layout.padding.vsum());
    let points: Vec<PlotPoint> = lines[0].points.iter().cloned().map(PlotPoint::from).collect();
    match find_closest(&points, plot_w / 2.0, plot_h / 2.0, plot_w, plot_h) {
        Some(p) => println!("  click center -> {}", tooltip_label(p)),
        None => warn!(chart = %chart.chart.name, "plot area too small for hit-testing"),
    }

    let hidden = view.apply(ViewEvent::ToggleSeries(0)).layout(lines, None);
    println!("  after hiding '{}': visible={:?}", lines[0].name(), hidden.visible);
}

/// Load a `timestamp,value` CSV into an overlay named after the file.
fn load_overlay_csv(path: &Path) -> Result<Overlay> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "ts", "date"]).unwrap_or(0);
    let i_value = idx(&["value", "v", "y"]).unwrap_or(1);

    let mut datapoints = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let t = rec.get(i_time).and_then(parse_time_to_secs);
        let v = rec.get(i_value).and_then(|s| s.trim().parse::<f64>().ok());
        match (t, v) {
            (Some(t), Some(v)) => datapoints.push(Datapoint::new(t, v)),
            _ => warn!(row = ?rec.position().map(|p| p.line()), "skipping unparsable overlay row"),
        }
    }
    info!(path = %path.display(), points = datapoints.len(), "loaded overlay");

    let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or("overlay");
    Ok(Overlay::new(title, "", Color::from_rgb(0xa3, 0x00, 0x00), datapoints))
}

/// Epoch timestamps in seconds or milliseconds -> seconds.
fn parse_time_to_secs(s: &str) -> Option<f64> {
    let n = s.trim().parse::<f64>().ok()?;
    if n > 1e12 { Some(n / 1000.0) } else { Some(n) }
}
