//! KLine Chart - a candlestick charting core written in Rust
//!
//! This crate provides the data and geometry pipeline behind a
//! scrollable, pinch-zoomable K-line chart:
//!
//! - OHLCV bar model and combinable value-axis bounds
//! - Technical indicator calculators (MA, EMA, RSI, MACD, VOL)
//! - A type-erased, runtime-mutable calculator registry
//! - A data source holding the bar list and its decorated indicator
//!   results as one atomically replaced pair, with a generation-stamped
//!   asynchronous recompute path
//! - Data-to-pixel coordinate transformation and O(1) visible-range
//!   windowing for scroll and pinch-zoom
//! - Keyed renderers emitting back-end neutral drawing primitives
//!
//! The crate never touches pixels: every frame it hands the host a list
//! of panes with immutable shapes, and the host's surface layer turns
//! those into actual drawing calls.
//!
//! # Quick Start
//!
//! ```rust
//! use kline_chart::{Bar, ChartView, ScrollPosition, StyleConfig};
//!
//! let mut chart = ChartView::with_size(StyleConfig::default(), 390.0, 600.0);
//! let bars: Vec<Bar> = (0..200)
//!     .map(|i| Bar::new(100.0 + i as f64, 101.0 + i as f64, 102.0 + i as f64, 99.0 + i as f64, 1_000, i))
//!     .collect();
//! chart.reload_data(bars, ScrollPosition::End);
//! let panes = chart.draw();
//! assert!(!panes.is_empty());
//! ```

pub mod bar;
pub mod chart;
pub mod datasource;
pub mod indicator;
pub mod logger;
pub mod style;

// Re-export commonly used types
pub use bar::{Bar, MetricBounds, Trend};
pub use chart::primitives::{Color, Point, Rect, Shape, Stroke};
pub use chart::transform::Transformer;
pub use chart::viewport::{PinchState, Viewport};
pub use chart::{ChartView, LegendEntry, PaneFrame, ScrollPosition};
pub use datasource::{DataSource, RecomputeJob, RecomputeOutcome};
pub use indicator::{
    calculators_for, AnyCalculator, Calculator, CalculatorRegistry, EmaCalculator, IndicatorData,
    IndicatorError, IndicatorKey, IndicatorType, IndicatorValue, MaCalculator, MacdCalculator,
    MacdValue, RsiCalculator, VolCalculator,
};
pub use style::{CandleStyle, IndicatorStyle, MacdStyle, StyleConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
