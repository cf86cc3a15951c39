//! Technical indicator identity, values and calculation contracts.

pub mod data;
pub mod ema;
pub mod ma;
pub mod macd;
pub mod registry;
pub mod rsi;
pub mod vol;

pub use data::{indicator_bounds, IndicatorData};
pub use ema::EmaCalculator;
pub use ma::MaCalculator;
pub use macd::MacdCalculator;
pub use registry::CalculatorRegistry;
pub use rsi::RsiCalculator;
pub use vol::VolCalculator;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bar::Bar;

/// Identifies one concrete indicator instance: kind plus parameters.
///
/// Equality and hashing are structural, so the key joins calculators,
/// computed values, renderers and style lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKey {
    Vol,
    Ma { period: usize },
    Ema { period: usize },
    Rsi { period: usize },
    Macd { short: usize, long: usize, signal: usize },
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKey::Vol => write!(f, "VOL"),
            IndicatorKey::Ma { period } => write!(f, "MA{}", period),
            IndicatorKey::Ema { period } => write!(f, "EMA{}", period),
            IndicatorKey::Rsi { period } => write!(f, "RSI{}", period),
            IndicatorKey::Macd { short, long, signal } => {
                write!(f, "MACD({},{},{})", short, long, signal)
            }
        }
    }
}

/// Indicator family, one per selectable chip in the UI. Each family
/// expands to a fixed, ordered list of concrete keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorType {
    Vol,
    Ma,
    Ema,
    Rsi,
    Macd,
}

impl IndicatorType {
    pub const ALL: [IndicatorType; 5] = [
        IndicatorType::Vol,
        IndicatorType::Ma,
        IndicatorType::Ema,
        IndicatorType::Rsi,
        IndicatorType::Macd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IndicatorType::Vol => "VOL",
            IndicatorType::Ma => "MA",
            IndicatorType::Ema => "EMA",
            IndicatorType::Rsi => "RSI",
            IndicatorType::Macd => "MACD",
        }
    }

    /// Concrete keys of the family.
    pub fn keys(&self) -> Vec<IndicatorKey> {
        match self {
            IndicatorType::Vol => vec![IndicatorKey::Vol],
            IndicatorType::Ma => [5, 20, 30, 60, 120]
                .iter()
                .map(|&period| IndicatorKey::Ma { period })
                .collect(),
            IndicatorType::Ema => [5, 10, 20]
                .iter()
                .map(|&period| IndicatorKey::Ema { period })
                .collect(),
            IndicatorType::Rsi => [6, 12, 24]
                .iter()
                .map(|&period| IndicatorKey::Rsi { period })
                .collect(),
            IndicatorType::Macd => vec![IndicatorKey::Macd {
                short: 12,
                long: 26,
                signal: 9,
            }],
        }
    }

    /// Whether the family overlays the main price pane. Families that
    /// return `false` get their own sub pane.
    pub fn is_main_pane(&self) -> bool {
        matches!(self, IndicatorType::Ma | IndicatorType::Ema)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Composite MACD sample: the dif line, the signal (dea) line and the
/// histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// A single computed indicator value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Scalar(f64),
    Macd(MacdValue),
}

impl IndicatorValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            IndicatorValue::Scalar(v) => Some(*v),
            IndicatorValue::Macd(_) => None,
        }
    }

    pub fn as_macd(&self) -> Option<MacdValue> {
        match self {
            IndicatorValue::Macd(v) => Some(*v),
            IndicatorValue::Scalar(_) => None,
        }
    }
}

impl From<f64> for IndicatorValue {
    fn from(value: f64) -> Self {
        IndicatorValue::Scalar(value)
    }
}

impl From<MacdValue> for IndicatorValue {
    fn from(value: MacdValue) -> Self {
        IndicatorValue::Macd(value)
    }
}

/// Errors raised by indicator calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// Rejected at configuration time; the calculator is unusable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Recoverable: the series stays empty for this indicator while the
    /// rest of the pipeline continues.
    #[error("insufficient data for period {period}")]
    InsufficientData { period: usize },
}

/// Calculation contract for one indicator.
///
/// The output has the same length as the input; entry `i` is `None`
/// where the indicator is undefined at position `i`. Calculators are
/// pure and share no state, which allows the registry to fan them out
/// in parallel.
pub trait Calculator: Send + Sync {
    type Value: Into<IndicatorValue>;

    fn key(&self) -> IndicatorKey;

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<Self::Value>>, IndicatorError>;
}

type ErasedCalculate =
    dyn Fn(&[Bar]) -> Result<Vec<Option<IndicatorValue>>, IndicatorError> + Send + Sync;

/// Closure-capturing type erasure over [`Calculator`], so calculators
/// with different value types can live in one registry. Cloning is
/// cheap; a recompute job clones the registry to own a snapshot.
#[derive(Clone)]
pub struct AnyCalculator {
    key: IndicatorKey,
    calculate: Arc<ErasedCalculate>,
}

impl AnyCalculator {
    pub fn new<C>(calculator: C) -> Self
    where
        C: Calculator + 'static,
    {
        let key = calculator.key();
        Self {
            key,
            calculate: Arc::new(move |bars| {
                let values = calculator.calculate(bars)?;
                Ok(values.into_iter().map(|v| v.map(Into::into)).collect())
            }),
        }
    }

    pub fn key(&self) -> IndicatorKey {
        self.key
    }

    pub fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<IndicatorValue>>, IndicatorError> {
        (self.calculate)(bars)
    }
}

impl fmt::Debug for AnyCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyCalculator").field("key", &self.key).finish()
    }
}

/// The calculators backing every key of an indicator family.
pub fn calculators_for(indicator_type: IndicatorType) -> Vec<AnyCalculator> {
    indicator_type
        .keys()
        .into_iter()
        .map(|key| match key {
            IndicatorKey::Vol => AnyCalculator::new(VolCalculator::new()),
            IndicatorKey::Ma { period } => AnyCalculator::new(MaCalculator::new(period)),
            IndicatorKey::Ema { period } => AnyCalculator::new(EmaCalculator::new(period)),
            IndicatorKey::Rsi { period } => AnyCalculator::new(RsiCalculator::new(period)),
            IndicatorKey::Macd { short, long, signal } => {
                AnyCalculator::new(MacdCalculator::new(short, long, signal))
            }
        })
        .collect()
}
