//! Basic data structures used throughout the charting core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price trend of a single bar, derived from the sign of
/// `closing - opening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// One OHLCV data point for a fixed time interval.
///
/// OHLC consistency (`highest >= max(opening, closing)` etc.) is not
/// enforced; malformed input propagates through the pipeline silently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub opening: f64,
    pub closing: f64,
    pub highest: f64,
    pub lowest: f64,
    pub volume: i64,
    /// Turnover. Carried for the host; unused by the chart itself.
    pub value: f64,
    /// Epoch seconds
    pub timestamp: i64,
}

impl Bar {
    pub fn new(opening: f64, closing: f64, highest: f64, lowest: f64, volume: i64, timestamp: i64) -> Self {
        Self {
            opening,
            closing,
            highest,
            lowest,
            volume,
            value: 0.0,
            timestamp,
        }
    }

    pub fn trend(&self) -> Trend {
        if self.closing > self.opening {
            Trend::Up
        } else if self.closing < self.opening {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    /// Bar timestamp as calendar time.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// The [minimum, maximum] of a numeric range, used to scale a value
/// axis. Combinable via component-wise min/max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    pub minimum: f64,
    pub maximum: f64,
}

impl MetricBounds {
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    /// Distance between the maximum and the minimum.
    pub fn distance(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// Merge another bounds into this one.
    pub fn combine(&mut self, other: MetricBounds) {
        self.minimum = self.minimum.min(other.minimum);
        self.maximum = self.maximum.max(other.maximum);
    }

    /// Combining constructor, useful when folding.
    pub fn combined(mut self, other: MetricBounds) -> Self {
        self.combine(other);
        self
    }

    /// Widen the bounds to include a single value.
    pub fn include(&mut self, value: f64) {
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
    }

    /// Price bounds of a bar slice: the min/max over every OHLC field.
    pub fn of_bars(bars: &[Bar]) -> Option<MetricBounds> {
        let first = bars.first()?;
        let mut bounds = MetricBounds::new(
            first.opening.min(first.closing).min(first.highest).min(first.lowest),
            first.opening.max(first.closing).max(first.highest).max(first.lowest),
        );
        for bar in &bars[1..] {
            bounds.include(bar.lowest);
            bounds.include(bar.highest);
            bounds.include(bar.opening);
            bounds.include(bar.closing);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend() {
        assert_eq!(Bar::new(1.0, 2.0, 2.0, 1.0, 10, 0).trend(), Trend::Up);
        assert_eq!(Bar::new(2.0, 1.0, 2.0, 1.0, 10, 0).trend(), Trend::Down);
        assert_eq!(Bar::new(2.0, 2.0, 2.0, 2.0, 10, 0).trend(), Trend::Flat);
    }

    #[test]
    fn test_datetime_conversion() {
        let bar = Bar::new(1.0, 1.0, 1.0, 1.0, 0, 1_700_000_000);
        assert_eq!(bar.datetime().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_combine() {
        let mut bounds = MetricBounds::new(1.0, 5.0);
        bounds.combine(MetricBounds::new(3.0, 10.0));
        assert_eq!(bounds, MetricBounds::new(1.0, 10.0));
    }

    #[test]
    fn test_combine_commutative_associative() {
        let a = MetricBounds::new(-2.0, 4.0);
        let b = MetricBounds::new(1.0, 9.0);
        let c = MetricBounds::new(-5.0, 0.5);

        assert_eq!(a.combined(b), b.combined(a));
        assert_eq!(a.combined(b).combined(c), a.combined(b.combined(c)));
    }

    #[test]
    fn test_bounds_of_bars() {
        let bars = vec![
            Bar::new(100.0, 102.0, 105.0, 95.0, 10, 0),
            Bar::new(102.0, 108.0, 110.0, 98.0, 20, 60),
        ];
        let bounds = MetricBounds::of_bars(&bars).unwrap();
        assert_eq!(bounds.minimum, 95.0);
        assert_eq!(bounds.maximum, 110.0);
        assert!(MetricBounds::of_bars(&[]).is_none());
    }
}
