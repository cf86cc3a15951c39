//! Decorated bar data and bounds queries over visible slices.

use std::collections::HashMap;

use crate::bar::{Bar, MetricBounds};

use super::{IndicatorKey, IndicatorValue, MacdValue};

/// Associates one bar with its computed indicator values.
///
/// One instance per bar, positionally aligned with the bar list; a key
/// is absent where the indicator is undefined at that position. The
/// whole set is created fresh on each recompute and replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorData {
    bar: Bar,
    values: HashMap<IndicatorKey, IndicatorValue>,
}

impl IndicatorData {
    pub fn new(bar: Bar) -> Self {
        Self {
            bar,
            values: HashMap::new(),
        }
    }

    pub fn bar(&self) -> &Bar {
        &self.bar
    }

    pub fn set(&mut self, key: IndicatorKey, value: IndicatorValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: IndicatorKey) -> Option<IndicatorValue> {
        self.values.get(&key).copied()
    }

    pub fn scalar(&self, key: IndicatorKey) -> Option<f64> {
        self.get(key).and_then(|value| value.as_scalar())
    }

    pub fn macd(&self, key: IndicatorKey) -> Option<MacdValue> {
        self.get(key).and_then(|value| value.as_macd())
    }

    pub fn keys(&self) -> impl Iterator<Item = &IndicatorKey> {
        self.values.keys()
    }
}

/// Bounds of one indicator over a decorated slice. MACD entries
/// contribute all three of their fields; `None` when the slice holds no
/// value for the key.
pub fn indicator_bounds(data: &[IndicatorData], key: IndicatorKey) -> Option<MetricBounds> {
    fn fold(bounds: &mut Option<MetricBounds>, value: f64) {
        match bounds {
            Some(bounds) => bounds.include(value),
            None => *bounds = Some(MetricBounds::new(value, value)),
        }
    }

    let mut bounds: Option<MetricBounds> = None;
    for item in data {
        match item.get(key) {
            Some(IndicatorValue::Scalar(v)) => fold(&mut bounds, v),
            Some(IndicatorValue::Macd(v)) => {
                fold(&mut bounds, v.macd);
                fold(&mut bounds, v.signal);
                fold(&mut bounds, v.histogram);
            }
            None => {}
        }
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decorated(close: f64) -> IndicatorData {
        IndicatorData::new(Bar::new(close, close, close, close, 100, 0))
    }

    #[test]
    fn test_set_get() {
        let key = IndicatorKey::Ma { period: 5 };
        let mut data = decorated(10.0);
        assert_eq!(data.get(key), None);

        data.set(key, IndicatorValue::Scalar(9.5));
        assert_eq!(data.scalar(key), Some(9.5));
        assert_eq!(data.macd(key), None);
    }

    #[test]
    fn test_scalar_bounds() {
        let key = IndicatorKey::Ma { period: 5 };
        let mut items = vec![decorated(1.0), decorated(2.0), decorated(3.0)];
        items[0].set(key, IndicatorValue::Scalar(4.0));
        items[2].set(key, IndicatorValue::Scalar(-1.0));

        let bounds = indicator_bounds(&items, key).unwrap();
        assert_eq!(bounds, MetricBounds::new(-1.0, 4.0));
        assert!(indicator_bounds(&items, IndicatorKey::Vol).is_none());
    }

    #[test]
    fn test_macd_bounds_cover_all_fields() {
        let key = IndicatorKey::Macd { short: 12, long: 26, signal: 9 };
        let mut item = decorated(1.0);
        item.set(
            key,
            IndicatorValue::Macd(MacdValue { macd: 0.5, signal: -0.25, histogram: 1.5 }),
        );

        let bounds = indicator_bounds(&[item], key).unwrap();
        assert_eq!(bounds, MetricBounds::new(-0.25, 1.5));
    }
}
