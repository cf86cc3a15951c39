//! RSI sub-pane drawing unit.

use tracing::debug;

use crate::bar::{Bar, MetricBounds};
use crate::chart::primitives::{Point, Shape, Stroke};
use crate::indicator::{indicator_bounds, IndicatorData, IndicatorType};
use crate::style::GRID_COLOR;

use super::{scalar_polylines, RenderContext, Renderer};

/// Oversold / overbought reference levels.
const REFERENCE_LEVELS: [f64; 2] = [30.0, 70.0];

/// Draws one polyline per configured RSI period plus the 30/70
/// reference levels. The pane bounds always include both levels so they
/// stay on screen even when the lines hug one extreme.
#[derive(Debug, Default)]
pub struct RsiRenderer;

impl RsiRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for RsiRenderer {
    fn indicator_type(&self) -> Option<IndicatorType> {
        Some(IndicatorType::Rsi)
    }

    fn value_bounds(&self, _bars: &[Bar], data: &[IndicatorData]) -> Option<MetricBounds> {
        let mut bounds = IndicatorType::Rsi
            .keys()
            .into_iter()
            .filter_map(|key| indicator_bounds(data, key))
            .reduce(MetricBounds::combined)?;
        for level in REFERENCE_LEVELS {
            bounds.include(level);
        }
        Some(bounds)
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> Vec<Shape> {
        let mut shapes = Vec::new();

        let reference_stroke = Stroke::new(0.5, GRID_COLOR);
        for level in REFERENCE_LEVELS {
            let y = ctx.transformer.y_for(level);
            shapes.push(Shape::Line {
                from: Point::new(0.0, y),
                to: Point::new(ctx.rect.width, y),
                stroke: reference_stroke,
            });
        }

        for key in IndicatorType::Rsi.keys() {
            let Some(style) = ctx.styles.style_for(key) else {
                debug!(key = %key, "no style assigned, skipping line");
                continue;
            };
            let stroke = Stroke::new(style.line_width, style.color);
            shapes.extend(scalar_polylines(ctx, key, stroke));
        }

        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::primitives::Rect;
    use crate::chart::transform::Transformer;
    use crate::indicator::{AnyCalculator, CalculatorRegistry, IndicatorKey, RsiCalculator};
    use crate::style::StyleConfig;

    fn rising_bars(count: usize) -> Vec<Bar> {
        (1..=count)
            .map(|i| {
                let close = i as f64;
                Bar::new(close - 0.5, close, close + 0.5, close - 1.0, 100, i as i64 * 60)
            })
            .collect()
    }

    #[test]
    fn test_bounds_include_reference_levels() {
        let bars = rising_bars(30);
        let mut registry = CalculatorRegistry::new();
        registry.install(AnyCalculator::new(RsiCalculator::new(6)));
        let data = registry.decorate(&bars);

        // A strictly rising series pins RSI at 100; the levels widen the
        // low end down to 30
        let bounds = RsiRenderer::new().value_bounds(&bars, &data).unwrap();
        assert_eq!(bounds.minimum, 30.0);
        assert_eq!(bounds.maximum, 100.0);
    }

    #[test]
    fn test_no_values_draws_nothing() {
        assert!(RsiRenderer::new().value_bounds(&[], &[]).is_none());
    }

    #[test]
    fn test_draw_emits_reference_lines_and_polyline() {
        let bars = rising_bars(30);
        let mut registry = CalculatorRegistry::new();
        registry.install(AnyCalculator::new(RsiCalculator::new(6)));
        let data = registry.decorate(&bars);

        let renderer = RsiRenderer::new();
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
        let lines = shapes.iter().filter(|s| matches!(s, Shape::Line { .. })).count();
        let polylines = shapes.iter().filter(|s| matches!(s, Shape::Polyline { .. })).count();
        assert_eq!(lines, 2);
        // Only RSI(6) was computed; RSI(12)/RSI(24) have no values
        assert_eq!(polylines, 1);
    }

    #[test]
    fn test_polyline_starts_after_warmup() {
        let bars = rising_bars(30);
        let mut registry = CalculatorRegistry::new();
        registry.install(AnyCalculator::new(RsiCalculator::new(6)));
        let data = registry.decorate(&bars);

        let renderer = RsiRenderer::new();
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
        let points = shapes
            .iter()
            .find_map(|s| match s {
                Shape::Polyline { points, .. } => Some(points.len()),
                _ => None,
            })
            .unwrap();
        let defined = data
            .iter()
            .filter(|item| item.scalar(IndicatorKey::Rsi { period: 6 }).is_some())
            .count();
        assert_eq!(points, defined);
    }
}
