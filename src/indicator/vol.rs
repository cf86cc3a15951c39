//! Volume pass-through.

use crate::bar::Bar;

use super::{Calculator, IndicatorError, IndicatorKey};

/// Volume (VOL): the identity series of each bar's volume. Always
/// defined, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolCalculator;

impl VolCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for VolCalculator {
    type Value = f64;

    fn key(&self) -> IndicatorKey {
        IndicatorKey::Vol
    }

    fn calculate(&self, bars: &[Bar]) -> Result<Vec<Option<f64>>, IndicatorError> {
        Ok(bars.iter().map(|bar| Some(bar.volume as f64)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let bars = vec![
            Bar::new(1.0, 2.0, 2.0, 1.0, 1_000, 0),
            Bar::new(2.0, 1.0, 2.0, 1.0, 2_500, 60),
        ];
        let values = VolCalculator::new().calculate(&bars).unwrap();
        assert_eq!(values, vec![Some(1_000.0), Some(2_500.0)]);
    }

    #[test]
    fn test_empty_input() {
        let values = VolCalculator::new().calculate(&[]).unwrap();
        assert!(values.is_empty());
    }
}
