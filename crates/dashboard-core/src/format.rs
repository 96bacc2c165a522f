// File: crates/dashboard-core/src/format.rs
// Summary: Unit-aware value formatting for axis ticks and tooltips.

use crate::point::PlotPoint;

const SIGNIFICANT_DIGITS: i32 = 3;

const SI_PREFIXES: [(f64, &str); 8] = [
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
];

const IEC_UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
const SI_BYTE_UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// Format `value` for display in `unit`.
///
/// `seconds`, `bytes`/`bytes-iec`, `bytes-si` and `%`/`percent` get dedicated
/// scaling; any other unit uses SI prefixes followed by the unit name.
pub fn format_value(unit: &str, value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }
    match unit {
        "seconds" => {
            let (scaled, prefix) = if value.abs() >= 1.0 { (value, "") } else { si_scale(value) };
            format!("{}{}s", significant(scaled), prefix)
        }
        "bytes" | "bytes-iec" => stepped(value, 1024.0, &IEC_UNITS),
        "bytes-si" => stepped(value, 1000.0, &SI_BYTE_UNITS),
        "%" | "percent" => format!("{}%", significant(value)),
        "" => {
            let (scaled, prefix) = si_scale(value);
            format!("{}{}", significant(scaled), prefix)
        }
        other => {
            let (scaled, prefix) = si_scale(value);
            format!("{}{} {}", significant(scaled), prefix, other)
        }
    }
}

/// Tooltip text for a hovered point, showing values in the point's own unit
/// with any overlay scaling undone.
pub fn tooltip_label(point: &PlotPoint) -> String {
    let info = point.info();
    let unit = info.unit.as_deref().unwrap_or("");
    match point {
        PlotPoint::Raw(p) => format!("{}: {}", info.name, format_value(unit, p.original_y())),
        PlotPoint::Bucket(b) => match b.stats() {
            Some(s) => {
                let f = info.factor();
                format!(
                    "{}: {} .. {} (median {}, {} values)",
                    info.name,
                    format_value(unit, s.min / f),
                    format_value(unit, s.max / f),
                    format_value(unit, s.median / f),
                    s.count
                )
            }
            None => format!("{}: no data", info.name),
        },
    }
}

/// Tick label on a secondary axis whose values were multiplied by `factor`.
pub fn secondary_tick_label(unit: &str, tick: f64, factor: f64) -> String {
    format_value(unit, tick / factor)
}

fn si_scale(value: f64) -> (f64, &'static str) {
    if value == 0.0 {
        return (0.0, "");
    }
    let abs = value.abs();
    let (div, prefix) = SI_PREFIXES
        .iter()
        .find(|(div, _)| abs >= *div)
        .copied()
        .unwrap_or(SI_PREFIXES[SI_PREFIXES.len() - 1]);
    (value / div, prefix)
}

fn stepped(value: f64, step: f64, units: &[&str]) -> String {
    let mut scaled = value;
    let mut idx = 0;
    while scaled.abs() >= step && idx + 1 < units.len() {
        scaled /= step;
        idx += 1;
    }
    format!("{}{}", significant(scaled), units[idx])
}

/// At most three significant digits, trailing zeros trimmed.
fn significant(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let digits = v.abs().log10().floor() as i32 + 1;
    let decimals = (SIGNIFICANT_DIGITS - digits).max(0) as usize;
    let s = format!("{:.*}", decimals, v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
