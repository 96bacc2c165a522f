// File: crates/dashboard-core/src/palette.rs
// Summary: Named color palettes and the round-robin cursor used during one supply pass.

use crate::color::Color;
use crate::error::{ChartError, Result};

/// Ordered list of series colors. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self { name: name.into(), colors })
    }

    /// Build a palette from hex strings, e.g. user-supplied options.
    pub fn from_hex<S: AsRef<str>>(name: impl Into<String>, hex: &[S]) -> Result<Self> {
        let colors = hex.iter().map(|h| h.as_ref().parse()).collect::<Result<Vec<Color>>>()?;
        Self::new(name, colors)
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// Start a fresh cursor at the first color.
    pub fn cursor(&self) -> ColorCursor<'_> {
        ColorCursor { colors: &self.colors, idx: 0 }
    }

    pub fn multi() -> Self {
        Self::preset("multi", &[
            Color::from_rgb(0x00, 0x66, 0xcc), // blue
            Color::from_rgb(0x4c, 0xb1, 0x40), // green
            Color::from_rgb(0x00, 0x95, 0x96), // cyan
            Color::from_rgb(0xf4, 0xc1, 0x45), // gold
            Color::from_rgb(0xec, 0x7a, 0x08), // orange
            Color::from_rgb(0x5c, 0x40, 0x9e), // purple
            Color::from_rgb(0xa3, 0x00, 0x00), // red
            Color::from_rgb(0x8a, 0x8d, 0x90), // grey
        ])
    }

    pub fn blue() -> Self {
        Self::preset("blue", &[
            Color::from_rgb(0x00, 0x66, 0xcc),
            Color::from_rgb(0x8b, 0xc1, 0xf7),
            Color::from_rgb(0x00, 0x2f, 0x5d),
            Color::from_rgb(0x51, 0x9d, 0xe9),
            Color::from_rgb(0x00, 0x4b, 0x95),
        ])
    }

    pub fn green() -> Self {
        Self::preset("green", &[
            Color::from_rgb(0x4c, 0xb1, 0x40),
            Color::from_rgb(0xbd, 0xe2, 0xb9),
            Color::from_rgb(0x23, 0x51, 0x1e),
            Color::from_rgb(0x7c, 0xc6, 0x74),
            Color::from_rgb(0x38, 0x81, 0x2f),
        ])
    }

    pub fn high_contrast() -> Self {
        Self::preset("high-contrast", &[
            Color::from_rgb(0x00, 0xff, 0xff),
            Color::from_rgb(0xff, 0xff, 0x00),
            Color::from_rgb(0xff, 0x00, 0xff),
            Color::from_rgb(0x00, 0xff, 0x00),
            Color::from_rgb(0xff, 0x80, 0x00),
        ])
    }

    fn preset(name: &str, colors: &[Color]) -> Self {
        Self { name: name.to_string(), colors: colors.to_vec() }
    }
}

impl Default for Palette {
    fn default() -> Self { Self::multi() }
}

/// Round-robin position over a palette. Created per supply pass and
/// threaded through the fold, so repeated passes are independent.
#[derive(Debug)]
pub struct ColorCursor<'a> {
    colors: &'a [Color],
    idx: usize,
}

impl ColorCursor<'_> {
    pub fn next_color(&mut self) -> Color {
        let c = self.colors[self.idx % self.colors.len()];
        self.idx += 1;
        c
    }

    /// Number of colors handed out so far.
    pub fn position(&self) -> usize { self.idx }
}

/// Return a list of built-in palette presets.
pub fn presets() -> Vec<Palette> {
    vec![Palette::multi(), Palette::blue(), Palette::green(), Palette::high_contrast()]
}

/// Find a palette by its name, falling back to `multi`.
pub fn find(name: &str) -> Palette {
    for p in presets() { if p.name.eq_ignore_ascii_case(name) { return p; } }
    Palette::multi()
}
