//! Relative strength index over closing-price deltas.

use crate::bar::Bar;

use super::{Calculator, IndicatorError, IndicatorKey};

/// Relative strength index (RSI).
///
/// Average gain/loss is the simple trailing mean of the last `period`
/// deltas, recomputed per index. This is deliberately not Wilder's
/// smoothed recursive average; the simple mean matches the charting
/// behavior this crate reproduces.
#[derive(Debug, Clone, Copy)]
pub struct RsiCalculator {
    period: usize,
}

impl RsiCalculator {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Calculator for RsiCalculator {
    type Value = f64;

    fn key(&self) -> IndicatorKey {
        IndicatorKey::Rsi { period: self.period }
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<f64>>, IndicatorError> {
        if self.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "period must be greater than zero".to_string(),
            ));
        }
        if bars.len() <= self.period {
            return Err(IndicatorError::InsufficientData { period: self.period });
        }

        let mut result = vec![None; bars.len()];
        // gains[j] / losses[j] belong to the delta into bar j + 1
        let mut gains = Vec::with_capacity(bars.len() - 1);
        let mut losses = Vec::with_capacity(bars.len() - 1);
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;

        for i in 1..bars.len() {
            let change = bars[i].closing - bars[i - 1].closing;
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);
            gains.push(gain);
            losses.push(loss);
            gain_sum += gain;
            loss_sum += loss;

            if i >= self.period {
                if i > self.period {
                    // Drop the delta that left the trailing window
                    gain_sum -= gains[i - 1 - self.period];
                    loss_sum -= losses[i - 1 - self.period];
                }

                let avg_gain = gain_sum / self.period as f64;
                let avg_loss = loss_sum / self.period as f64;

                result[i] = if avg_loss == 0.0 {
                    Some(100.0)
                } else {
                    let rs = avg_gain / avg_loss;
                    Some(100.0 - 100.0 / (1.0 + rs))
                };
            }
        }

        Ok(result)
    }
}
