//! Exponential moving average of the closing price.

use crate::bar::Bar;

use super::{Calculator, IndicatorError, IndicatorKey};

/// Exponential moving average (EMA), smoothing factor `2 / (period + 1)`.
///
/// The series is seeded with the simple average of the first `period`
/// closes, so indices below `period - 1` are `None`.
#[derive(Debug, Clone, Copy)]
pub struct EmaCalculator {
    period: usize,
}

impl EmaCalculator {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Calculator for EmaCalculator {
    type Value = f64;

    fn key(&self) -> IndicatorKey {
        IndicatorKey::Ema { period: self.period }
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<f64>>, IndicatorError> {
        if self.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "period must be greater than zero".to_string(),
            ));
        }
        if bars.len() < self.period {
            return Err(IndicatorError::InsufficientData { period: self.period });
        }

        let closes: Vec<f64> = bars.iter().map(|bar| bar.closing).collect();
        Ok(ema_series(&closes, self.period))
    }
}

/// EMA over a dense value series. Seeded with the SMA of the first
/// `period` values; all `None` when the series is shorter than the
/// period. Shared with the MACD calculator, which runs it over closes
/// and over its own dif series.
pub(crate) fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(ema);

    for i in period..values.len() {
        ema = values[i] * multiplier + ema * (1.0 - multiplier);
        result[i] = Some(ema);
    }

    result
}
