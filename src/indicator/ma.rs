//! Simple moving average of the closing price.

use crate::bar::Bar;

use super::{Calculator, IndicatorError, IndicatorKey};

/// Simple moving average (MA).
///
/// Indices below `period - 1` carry the partial average over the head
/// of the series instead of a leading gap; from `period - 1` on the
/// exact trailing mean is maintained with a running sum.
#[derive(Debug, Clone, Copy)]
pub struct MaCalculator {
    period: usize,
}

impl MaCalculator {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Calculator for MaCalculator {
    type Value = f64;

    fn key(&self) -> IndicatorKey {
        IndicatorKey::Ma { period: self.period }
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

        let mut result = vec![None; bars.len()];
        let mut sum = 0.0;

        for (i, bar) in bars.iter().enumerate() {
            sum += bar.closing;

            if i < self.period - 1 {
                // Partial average over the head of the series
                result[i] = Some(sum / (i + 1) as f64);
            } else {
                if i >= self.period {
                    sum -= bars[i - self.period].closing;
                }
                result[i] = Some(sum / self.period as f64);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(c, c, c, c, 100, i as i64 * 60))
            .collect()
    }

    #[test]
    fn test_rejects_zero_period() {
        let bars = close_bars(&[1.0, 2.0, 3.0]);
        assert_eq!(
            MaCalculator::new(0).calculate(&bars).unwrap_err(),
            IndicatorError::InvalidParameter("period must be greater than zero".to_string())
        );
    }

    #[test]
    fn test_rejects_short_series() {
        let bars = close_bars(&[1.0, 2.0]);
        assert_eq!(
            MaCalculator::new(3).calculate(&bars).unwrap_err(),
            IndicatorError::InsufficientData { period: 3 }
        );
    }

    #[test]
    fn test_partial_head_averages() {
        let bars = close_bars(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        let values = MaCalculator::new(3).calculate(&bars).unwrap();

        assert_eq!(values.len(), bars.len());
        assert_eq!(values[0], Some(2.0)); // 2 / 1
        assert_eq!(values[1], Some(3.0)); // (2 + 4) / 2
        assert_eq!(values[2], Some(4.0)); // (2 + 4 + 6) / 3
        assert_eq!(values[3], Some(6.0)); // (4 + 6 + 8) / 3
        assert_eq!(values[4], Some(8.0)); // (6 + 8 + 10) / 3
    }

    #[test]
    fn test_trailing_mean_matches_window_mean() {
        let closes: Vec<f64> = (1..=200).map(|v| v as f64).collect();
        let bars = close_bars(&closes);
        let period = 5;
        let values = MaCalculator::new(period).calculate(&bars).unwrap();

        assert!(values.iter().all(Option::is_some));
        for i in (period - 1)..bars.len() {
            let window: f64 = closes[i + 1 - period..=i].iter().sum();
            let expected = window / period as f64;
            assert!((values[i].unwrap() - expected).abs() < 1e-9);
        }
        // Linear ramp 1..=200: MA(5) at index 199 is mean(196..=200)
        assert!((values[199].unwrap() - 198.0).abs() < 1e-9);
    }
}
