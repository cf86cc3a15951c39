//! Chart styling.
//!
//! Styles live in an explicit [`StyleConfig`] constructed by the host
//! and passed to the view, so parallel chart instances can carry
//! different palettes. Renderers look styles up by [`IndicatorKey`] at
//! draw time; a key without a style is silently skipped.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chart::primitives::Color;
use crate::indicator::{IndicatorKey, IndicatorType};

// Price movement colors (Chinese style: red up, green down)
pub const UP_COLOR: Color = Color::rgb(235, 75, 75);
pub const DOWN_COLOR: Color = Color::rgb(60, 180, 120);
pub const FLAT_COLOR: Color = Color::rgb(160, 160, 160);

pub const GRID_COLOR: Color = Color::rgb(100, 100, 100);

/// Candlestick styling. The body width tracks the viewport pitch while
/// zooming; `gap` is the fixed spacing between neighboring items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleStyle {
    pub up_color: Color,
    pub down_color: Color,
    pub flat_color: Color,
    pub width: f32,
    pub gap: f32,
}

impl CandleStyle {
    /// Per-item horizontal footprint: candle width plus gap.
    pub fn pitch(&self) -> f32 {
        self.width + self.gap
    }
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            up_color: UP_COLOR,
            down_color: DOWN_COLOR,
            flat_color: FLAT_COLOR,
            width: 10.0,
            gap: 1.0,
        }
    }
}

/// Line styling for one indicator key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStyle {
    pub color: Color,
    pub line_width: f32,
}

impl IndicatorStyle {
    pub fn new(color: Color) -> Self {
        Self { color, line_width: 1.0 }
    }
}

/// Extra colors for the MACD pane's dif/dea lines; the histogram bars
/// reuse the candle trend colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdStyle {
    pub dif_color: Color,
    pub dea_color: Color,
    pub line_width: f32,
}

impl Default for MacdStyle {
    fn default() -> Self {
        Self {
            dif_color: Color::rgb(240, 140, 180),
            dea_color: Color::rgb(240, 165, 60),
            line_width: 1.0,
        }
    }
}

static DEFAULT_PALETTE: Lazy<HashMap<IndicatorKey, IndicatorStyle>> = Lazy::new(|| {
    let mut palette = HashMap::new();

    let line_colors = [
        Color::rgb(240, 165, 60),  // orange
        Color::rgb(90, 155, 245),  // blue
        Color::rgb(200, 110, 220), // purple
        Color::rgb(240, 140, 180), // pink
        Color::rgb(110, 200, 110), // green
    ];

    for family in IndicatorType::ALL {
        for (i, key) in family.keys().into_iter().enumerate() {
            let color = match key {
                IndicatorKey::Vol => UP_COLOR,
                _ => line_colors[i % line_colors.len()],
            };
            palette.insert(key, IndicatorStyle::new(color));
        }
    }

    palette
});

/// All styling for one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub candle: CandleStyle,
    pub macd: MacdStyle,
    indicator: HashMap<IndicatorKey, IndicatorStyle>,
}

impl StyleConfig {
    /// A config with the default palette covering every built-in key.
    pub fn new() -> Self {
        Self::default()
    }

    /// A config with no indicator styles assigned; renderers skip
    /// unstyled keys.
    pub fn empty() -> Self {
        Self {
            candle: CandleStyle::default(),
            macd: MacdStyle::default(),
            indicator: HashMap::new(),
        }
    }

    pub fn style_for(&self, key: IndicatorKey) -> Option<IndicatorStyle> {
        self.indicator.get(&key).copied()
    }

    pub fn set_style(&mut self, key: IndicatorKey, style: IndicatorStyle) {
        self.indicator.insert(key, style);
    }

    pub fn remove_style(&mut self, key: IndicatorKey) {
        self.indicator.remove(&key);
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            candle: CandleStyle::default(),
            macd: MacdStyle::default(),
            indicator: DEFAULT_PALETTE.clone(),
        }
    }
}
