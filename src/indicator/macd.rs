//! Moving average convergence/divergence.

use crate::bar::Bar;

use super::ema::ema_series;
use super::{Calculator, IndicatorError, IndicatorKey, MacdValue};

/// MACD(short, long, signal).
///
/// dif = EMA(short) - EMA(long) of the closes; dea = EMA(signal) of the
/// dif series; histogram = `2 * (dif - dea)`, the common K-line app
/// convention. Entries are `None` until dif and dea are both defined.
#[derive(Debug, Clone, Copy)]
pub struct MacdCalculator {
    short: usize,
    long: usize,
    signal: usize,
}

impl MacdCalculator {
    pub fn new(short: usize, long: usize, signal: usize) -> Self {
        Self { short, long, signal }
    }
}

impl Calculator for MacdCalculator {
    type Value = MacdValue;

    fn key(&self) -> IndicatorKey {
        IndicatorKey::Macd {
            short: self.short,
            long: self.long,
            signal: self.signal,
        }
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<MacdValue>>, IndicatorError> {
        if self.short == 0 || self.long == 0 || self.signal == 0 {
            return Err(IndicatorError::InvalidParameter(
                "periods must be greater than zero".to_string(),
            ));
        }
        if self.short >= self.long {
            return Err(IndicatorError::InvalidParameter(
                "short period must be smaller than long period".to_string(),
            ));
        }
        if bars.len() < self.long {
            return Err(IndicatorError::InsufficientData { period: self.long });
        }

        let closes: Vec<f64> = bars.iter().map(|bar| bar.closing).collect();
        let fast = ema_series(&closes, self.short);
        let slow = ema_series(&closes, self.long);

        // dif is dense from `long - 1` on (short < long)
        let offset = self.long - 1;
        let dif: Vec<f64> = (offset..bars.len())
            .map(|i| fast[i].unwrap_or(0.0) - slow[i].unwrap_or(0.0))
            .collect();
        let dea = ema_series(&dif, self.signal);

        let mut result = vec![None; bars.len()];
        for (j, dea_value) in dea.iter().enumerate() {
            if let Some(dea_value) = dea_value {
                let macd = dif[j];
                result[offset + j] = Some(MacdValue {
                    macd,
                    signal: *dea_value,
                    histogram: 2.0 * (macd - dea_value),
                });
            }
        }

        Ok(result)
    }
}
