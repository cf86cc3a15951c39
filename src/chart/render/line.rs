//! Polyline drawing unit for scalar indicator families (MA, EMA).

use tracing::debug;

use crate::bar::{Bar, MetricBounds};
use crate::chart::primitives::{Shape, Stroke};
use crate::indicator::{indicator_bounds, IndicatorData, IndicatorType};

use super::{scalar_polylines, RenderContext, Renderer};

/// Draws one polyline per concrete key of a scalar family, overlaid on
/// the main price pane. Keys without an assigned style are skipped.
#[derive(Debug)]
pub struct ScalarLineRenderer {
    family: IndicatorType,
}

impl ScalarLineRenderer {
    pub fn new(family: IndicatorType) -> Self {
        Self { family }
    }
}

impl Renderer for ScalarLineRenderer {
    fn indicator_type(&self) -> Option<IndicatorType> {
        Some(self.family)
    }

    fn value_bounds(&self, _bars: &[Bar], data: &[IndicatorData]) -> Option<MetricBounds> {
        self.family
            .keys()
            .into_iter()
            .filter_map(|key| indicator_bounds(data, key))
            .reduce(MetricBounds::combined)
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> Vec<Shape> {
        let mut shapes = Vec::new();

        for key in self.family.keys() {
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
    use crate::indicator::{AnyCalculator, CalculatorRegistry, IndicatorKey, MaCalculator};
    use crate::style::StyleConfig;

    fn decorated_ramp(count: usize) -> (Vec<Bar>, Vec<IndicatorData>) {
        let bars: Vec<Bar> = (1..=count)
            .map(|i| {
                let close = i as f64;
                Bar::new(close, close, close + 1.0, close - 1.0, 100, i as i64 * 60)
            })
            .collect();
        let mut registry = CalculatorRegistry::new();
        registry.install(AnyCalculator::new(MaCalculator::new(5)));
        let data = registry.decorate(&bars);
        (bars, data)
    }

    fn transformer(bars: &[Bar]) -> Transformer {
        let bounds = MetricBounds::of_bars(bars).unwrap();
        Transformer::new(11.0, bounds, Rect::new(0.0, 0.0, 300.0, 200.0))
    }

    #[test]
    fn test_unstyled_family_draws_nothing() {
        let (bars, data) = decorated_ramp(30);
        let transformer = transformer(&bars);
        let styles = StyleConfig::empty();
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        let shapes = ScalarLineRenderer::new(IndicatorType::Ma).draw(&ctx);
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_styled_key_produces_polyline() {
        let (bars, data) = decorated_ramp(30);
        let transformer = transformer(&bars);
        let styles = StyleConfig::default();
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        // Only MA(5) was computed; the other family keys have no values
        let shapes = ScalarLineRenderer::new(IndicatorType::Ma).draw(&ctx);
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Polyline { points, .. } => assert_eq!(points.len(), bars.len()),
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_bounds_union_over_family_keys() {
        let (_, data) = decorated_ramp(30);
        let renderer = ScalarLineRenderer::new(IndicatorType::Ma);
        let bounds = renderer.value_bounds(&[], &data).unwrap();
        let direct = indicator_bounds(&data, IndicatorKey::Ma { period: 5 }).unwrap();
        assert_eq!(bounds, direct);
    }
}
