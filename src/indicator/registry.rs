//! Type-erased calculator registry.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::bar::Bar;

use super::{AnyCalculator, IndicatorData, IndicatorError, IndicatorKey, IndicatorValue};

type CalculationResult = Result<Vec<Option<IndicatorValue>>, IndicatorError>;

/// An ordered, key-deduplicated set of calculators behind one uniform
/// interface.
///
/// `install` is a no-op when a calculator with the same key is already
/// present; `remove` is a no-op when the key is absent. Decoration runs
/// every registered calculator over the full bar list and produces one
/// [`IndicatorData`] per bar. A calculator that fails is logged and
/// omitted for all bars; the remaining indicators are unaffected.
#[derive(Debug, Clone, Default)]
pub struct CalculatorRegistry {
    calculators: Vec<AnyCalculator>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, calculator: AnyCalculator) {
        if self.contains(calculator.key()) {
            debug!(key = %calculator.key(), "calculator already installed");
            return;
        }
        self.calculators.push(calculator);
    }

    pub fn install_all(&mut self, calculators: impl IntoIterator<Item = AnyCalculator>) {
        for calculator in calculators {
            self.install(calculator);
        }
    }

    pub fn remove(&mut self, key: IndicatorKey) {
        self.calculators.retain(|calculator| calculator.key() != key);
    }

    pub fn contains(&self, key: IndicatorKey) -> bool {
        self.calculators.iter().any(|calculator| calculator.key() == key)
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Keys in install order.
    pub fn keys(&self) -> Vec<IndicatorKey> {
        self.calculators.iter().map(AnyCalculator::key).collect()
    }

    /// Run every calculator sequentially and decorate the bars.
    pub fn decorate(&self, bars: &[Bar]) -> Vec<IndicatorData> {
        let results: Vec<(IndicatorKey, CalculationResult)> = self
            .calculators
            .iter()
            .map(|calculator| (calculator.key(), calculator.calculate(bars)))
            .collect();
        Self::assemble(bars, results)
    }

    /// Fan out one task per calculator, join, then decorate. Produces
    /// output bit-identical to [`decorate`](Self::decorate); nothing is
    /// visible to callers before every task has finished.
    pub fn decorate_parallel(&self, bars: &[Bar]) -> Vec<IndicatorData> {
        let results: Vec<(IndicatorKey, CalculationResult)> = self
            .calculators
            .par_iter()
            .map(|calculator| (calculator.key(), calculator.calculate(bars)))
            .collect();
        Self::assemble(bars, results)
    }

    fn assemble(
        bars: &[Bar],
        results: Vec<(IndicatorKey, CalculationResult)>,
    ) -> Vec<IndicatorData> {
        let mut decorated: Vec<IndicatorData> = bars.iter().map(|bar| IndicatorData::new(*bar)).collect();

        for (key, result) in results {
            match result {
                Ok(series) => {
                    for (data, value) in decorated.iter_mut().zip(series) {
                        if let Some(value) = value {
                            data.set(key, value);
                        }
                    }
                }
                Err(error) => {
                    warn!(key = %key, %error, "indicator omitted from decoration");
                }
            }
        }

        decorated
    }
}
