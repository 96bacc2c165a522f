// File: crates/dashboard-core/src/options.rs
// Summary: Display configuration (palette, overlay axis policy, default width) with TOML loading.

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::overlay::AxisPolicy;
use crate::palette::{self, Palette};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayOptions {
    /// Preset palette name; ignored when `colors` is set.
    pub palette: String,
    /// Explicit series colors as hex strings.
    pub colors: Option<Vec<String>>,
    pub overlay_policy: AxisPolicy,
    /// Bucket count applied to overlays that do not set their own.
    pub overlay_buckets: Option<usize>,
    /// Chart width in pixels used for legend and tick layout.
    pub width: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            palette: "multi".to_string(),
            colors: None,
            overlay_policy: AxisPolicy::default(),
            overlay_buckets: None,
            width: 800.0,
        }
    }
}

impl DisplayOptions {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let opts: Self = toml::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.overlay_policy;
        if !(p.min_ratio > 0.0) || !(p.max_ratio > 0.0) {
            return Err(ChartError::InvalidOptions("overlay ratios must be positive".into()));
        }
        if p.min_ratio > p.max_ratio {
            return Err(ChartError::InvalidOptions(format!(
                "overlay min_ratio {} exceeds max_ratio {}",
                p.min_ratio, p.max_ratio
            )));
        }
        if self.overlay_buckets == Some(0) {
            return Err(ChartError::InvalidOptions("overlay_buckets must be at least 1".into()));
        }
        if !(self.width >= 0.0) {
            return Err(ChartError::InvalidOptions(format!("width {} must be non-negative", self.width)));
        }
        Ok(())
    }

    /// Resolve the series palette: explicit colors win over the preset name.
    pub fn palette(&self) -> Result<Palette> {
        match &self.colors {
            Some(colors) => Palette::from_hex("custom", colors),
            None => Ok(palette::find(&self.palette)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_document() {
        let opts = DisplayOptions::from_toml_str("").unwrap();
        assert_eq!(opts, DisplayOptions::default());
        assert_eq!(opts.palette().unwrap().name(), "multi");
    }

    #[test]
    fn explicit_colors_and_policy() {
        let opts = DisplayOptions::from_toml_str(
            "colors = [\"#ff0000\", \"#00ff00\"]\noverlay_buckets = 8\n[overlay_policy]\nmin_ratio = 0.25\n",
        ).unwrap();
        assert_eq!(opts.palette().unwrap().colors().len(), 2);
        assert_eq!(opts.overlay_policy.min_ratio, 0.25);
        assert_eq!(opts.overlay_policy.max_ratio, 2.0);
    }

    #[test]
    fn rejects_inverted_ratios() {
        let err = DisplayOptions::from_toml_str("[overlay_policy]\nmin_ratio = 3.0\n").unwrap_err();
        assert!(matches!(err, ChartError::InvalidOptions(_)));
    }
}
