//! Candlestick drawing unit.

use crate::bar::{Bar, MetricBounds, Trend};
use crate::chart::primitives::{Point, Rect, Shape, Stroke};
use crate::indicator::{IndicatorData, IndicatorType};

use super::{RenderContext, Renderer};

/// Draws the candle bodies and wicks of the visible slice. Rising and
/// flat candles are filled with the up color; falling candles are drawn
/// hollow with the down color.
#[derive(Debug, Default)]
pub struct CandleRenderer;

impl CandleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for CandleRenderer {
    fn indicator_type(&self) -> Option<IndicatorType> {
        None
    }

    fn value_bounds(&self, bars: &[Bar], _data: &[IndicatorData]) -> Option<MetricBounds> {
        MetricBounds::of_bars(bars)
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> Vec<Shape> {
        let candle = &ctx.styles.candle;
        let body_width = ctx.body_width();
        let mut shapes = Vec::with_capacity(ctx.bars.len() * 3);

        for (idx, bar) in ctx.bars.iter().enumerate() {
            let x = ctx.transformer.x_for(idx);
            let center_x = ctx.center_x(idx);

            let (color, filled) = match bar.trend() {
                Trend::Up => (candle.up_color, true),
                Trend::Down => (candle.down_color, false),
                Trend::Flat => (candle.flat_color, true),
            };
            let stroke = Stroke::new(1.0, color);

            let body_top = ctx.transformer.y_for(bar.opening.max(bar.closing));
            let body_bottom = ctx.transformer.y_for(bar.opening.min(bar.closing));
            let high_y = ctx.transformer.y_for(bar.highest);
            let low_y = ctx.transformer.y_for(bar.lowest);

            // Upper and lower wicks
            shapes.push(Shape::Line {
                from: Point::new(center_x, high_y),
                to: Point::new(center_x, body_top),
                stroke,
            });
            shapes.push(Shape::Line {
                from: Point::new(center_x, body_bottom),
                to: Point::new(center_x, low_y),
                stroke,
            });

            shapes.push(Shape::Rect {
                rect: Rect::new(x, body_top, body_width, body_bottom - body_top),
                stroke: Some(stroke),
                fill: filled.then_some(color),
            });
        }

        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::transform::Transformer;
    use crate::style::StyleConfig;

    fn context_parts(bars: &[Bar]) -> (Transformer, Vec<IndicatorData>, StyleConfig) {
        let bounds = MetricBounds::of_bars(bars).unwrap();
        let rect = Rect::new(0.0, 0.0, 300.0, 200.0);
        let transformer = Transformer::new(11.0, bounds, rect);
        let data = bars.iter().map(|bar| IndicatorData::new(*bar)).collect();
        (transformer, data, StyleConfig::default())
    }

    #[test]
    fn test_three_shapes_per_bar() {
        let bars = vec![
            Bar::new(10.0, 12.0, 13.0, 9.0, 100, 0),
            Bar::new(12.0, 11.0, 12.5, 10.5, 100, 60),
        ];
        let (transformer, data, styles) = context_parts(&bars);
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        let shapes = CandleRenderer::new().draw(&ctx);
        assert_eq!(shapes.len(), 6);
    }

    #[test]
    fn test_falling_body_is_hollow() {
        let bars = vec![Bar::new(12.0, 11.0, 12.5, 10.5, 100, 0)];
        let (transformer, data, styles) = context_parts(&bars);
        let ctx = RenderContext {
            rect: transformer.rect(),
            transformer: &transformer,
            bars: &bars,
            data: &data,
            styles: &styles,
        };

        let shapes = CandleRenderer::new().draw(&ctx);
        let body = shapes
            .iter()
            .find_map(|shape| match shape {
                Shape::Rect { fill, stroke, .. } => Some((fill, stroke)),
                _ => None,
            })
            .unwrap();
        assert!(body.0.is_none());
        assert_eq!(body.1.unwrap().color, styles.candle.down_color);
    }
}
