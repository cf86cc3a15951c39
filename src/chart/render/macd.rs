//! MACD sub-pane drawing unit.

use tracing::debug;

use crate::bar::{Bar, MetricBounds};
use crate::chart::primitives::{Point, Rect, Shape, Stroke};
use crate::indicator::{indicator_bounds, IndicatorData, IndicatorKey, IndicatorType, MacdValue};

use super::{RenderContext, Renderer};

/// Draws the MACD pane: sign-colored histogram bars around the zero
/// axis plus the dif and dea lines. The pane bounds are symmetric about
/// zero so the axis sits at mid-height.
#[derive(Debug, Default)]
pub struct MacdRenderer;

impl MacdRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn macd_at(data: &[IndicatorData], key: IndicatorKey, idx: usize) -> Option<MacdValue> {
    data.get(idx).and_then(|item| item.macd(key))
}

impl Renderer for MacdRenderer {
    fn indicator_type(&self) -> Option<IndicatorType> {
        Some(IndicatorType::Macd)
    }

    fn value_bounds(&self, _bars: &[Bar], data: &[IndicatorData]) -> Option<MetricBounds> {
        let bounds = IndicatorType::Macd
            .keys()
            .into_iter()
            .filter_map(|key| indicator_bounds(data, key))
            .reduce(MetricBounds::combined)?;
        let extent = bounds.minimum.abs().max(bounds.maximum.abs());
        Some(MetricBounds::new(-extent, extent))
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> Vec<Shape> {
        let mut shapes = Vec::new();
        let candle = &ctx.styles.candle;
        let macd_style = ctx.styles.macd;
        let body_width = ctx.body_width();
        let zero_y = ctx.transformer.y_for(0.0);

        for key in IndicatorType::Macd.keys() {
            if ctx.styles.style_for(key).is_none() {
                debug!(key = %key, "no style assigned, skipping pane");
                continue;
            }

            // Histogram sticks: colored by sign, hollow while shrinking
            for (idx, item) in ctx.data.iter().enumerate() {
                let Some(value) = item.macd(key) else { continue };
                let color = if value.histogram >= 0.0 {
                    candle.up_color
                } else {
                    candle.down_color
                };
                let previous = idx
                    .checked_sub(1)
                    .and_then(|prev| macd_at(ctx.data, key, prev))
                    .map(|prev| prev.histogram);
                let growing = previous.map_or(true, |prev| value.histogram.abs() >= prev.abs());

                let value_y = ctx.transformer.y_for(value.histogram);
                let top = value_y.min(zero_y);
                let height = (value_y - zero_y).abs();
                shapes.push(Shape::Rect {
                    rect: Rect::new(ctx.transformer.x_for(idx), top, body_width, height),
                    stroke: Some(Stroke::new(1.0, color)),
                    fill: growing.then_some(color),
                });
            }

            // dif and dea lines
            for (stroke, field) in [
                (
                    Stroke::new(macd_style.line_width, macd_style.dif_color),
                    (|value: MacdValue| value.macd) as fn(MacdValue) -> f64,
                ),
                (
                    Stroke::new(macd_style.line_width, macd_style.dea_color),
                    |value: MacdValue| value.signal,
                ),
            ] {
                let points: Vec<Point> = ctx
                    .data
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, item)| {
                        item.macd(key).map(|value| {
                            Point::new(ctx.center_x(idx), ctx.transformer.y_for(field(value)))
                        })
                    })
                    .collect();
                if points.len() >= 2 {
                    shapes.push(Shape::Polyline { points, stroke });
                }
            }
        }

        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::transform::Transformer;
    use crate::indicator::{AnyCalculator, CalculatorRegistry, MacdCalculator};
    use crate::style::StyleConfig;

    fn decorated_wave(count: usize) -> (Vec<Bar>, Vec<IndicatorData>) {
        let bars: Vec<Bar> = (0..count)
            .map(|i| {
                let close = 100.0 + 10.0 * ((i as f64) * 0.3).sin();
                Bar::new(close, close, close + 1.0, close - 1.0, 100, i as i64 * 60)
            })
            .collect();
        let mut registry = CalculatorRegistry::new();
        registry.install(AnyCalculator::new(MacdCalculator::new(12, 26, 9)));
        let data = registry.decorate(&bars);
        (bars, data)
    }

    #[test]
    fn test_bounds_are_symmetric_about_zero() {
        let (bars, data) = decorated_wave(120);
        let bounds = MacdRenderer::new().value_bounds(&bars, &data).unwrap();
        assert_eq!(bounds.minimum, -bounds.maximum);
        assert!(bounds.maximum > 0.0);
    }

    #[test]
    fn test_no_values_no_bounds() {
        assert!(MacdRenderer::new().value_bounds(&[], &[]).is_none());
    }

    #[test]
    fn test_draw_emits_sticks_and_two_lines() {
        let (bars, data) = decorated_wave(120);
        let renderer = MacdRenderer::new();
        let bounds = renderer.value_bounds(&bars, &data).unwrap();
        let transformer = Transformer::new(11.0, bounds, Rect::new(0.0, 0.0, 330.0, 100.0));
        let styles = StyleConfig::default();
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        let shapes = renderer.draw(&ctx);
        let key = IndicatorKey::Macd { short: 12, long: 26, signal: 9 };
        let defined = data.iter().filter(|item| item.macd(key).is_some()).count();
        let sticks = shapes.iter().filter(|s| matches!(s, Shape::Rect { .. })).count();
        let lines = shapes.iter().filter(|s| matches!(s, Shape::Polyline { .. })).count();
        assert_eq!(sticks, defined);
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_unstyled_key_draws_nothing() {
        let (bars, data) = decorated_wave(120);
        let renderer = MacdRenderer::new();
        let bounds = renderer.value_bounds(&bars, &data).unwrap();
        let transformer = Transformer::new(11.0, bounds, Rect::new(0.0, 0.0, 330.0, 100.0));
        let styles = StyleConfig::empty();
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        assert!(renderer.draw(&ctx).is_empty());
    }

    #[test]
    fn test_sticks_touch_zero_axis() {
        let (bars, data) = decorated_wave(120);
        let renderer = MacdRenderer::new();
        let bounds = renderer.value_bounds(&bars, &data).unwrap();
        let transformer = Transformer::new(11.0, bounds, Rect::new(0.0, 0.0, 330.0, 100.0));
        let zero_y = transformer.y_for(0.0);
        let styles = StyleConfig::default();
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        for shape in renderer.draw(&ctx) {
            if let Shape::Rect { rect, .. } = shape {
                let touches_top = (rect.y - zero_y).abs() < 1e-3;
                let touches_bottom = (rect.bottom() - zero_y).abs() < 1e-3;
                assert!(touches_top || touches_bottom);
            }
        }
    }
}
