//! Volume sub-pane drawing unit.

use crate::bar::{Bar, MetricBounds, Trend};
use crate::chart::primitives::{Rect, Shape, Stroke};
use crate::indicator::{IndicatorData, IndicatorType};

use super::{RenderContext, Renderer};

/// Draws per-bar volume sticks in their own pane. Sticks grow from the
/// pane floor and share the candle fill convention: rising and flat
/// bars filled, falling bars hollow.
#[derive(Debug, Default)]
pub struct VolRenderer;

impl VolRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for VolRenderer {
    fn indicator_type(&self) -> Option<IndicatorType> {
        Some(IndicatorType::Vol)
    }

    fn value_bounds(&self, bars: &[Bar], _data: &[IndicatorData]) -> Option<MetricBounds> {
        // Volume sticks are anchored at zero, so the pane always scales
        // from the floor up.
        let max = bars.iter().map(|bar| bar.volume).max()?;
        Some(MetricBounds::new(0.0, max as f64))
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> Vec<Shape> {
        let candle = &ctx.styles.candle;
        let body_width = ctx.body_width();
        let floor = ctx.transformer.y_for(0.0);
        let mut shapes = Vec::with_capacity(ctx.bars.len());

        for (idx, bar) in ctx.bars.iter().enumerate() {
            let (color, filled) = match bar.trend() {
                Trend::Up => (candle.up_color, true),
                Trend::Down => (candle.down_color, false),
                Trend::Flat => (candle.flat_color, true),
            };

            let top = ctx.transformer.y_for(bar.volume as f64);
            shapes.push(Shape::Rect {
                rect: Rect::new(ctx.transformer.x_for(idx), top, body_width, floor - top),
                stroke: Some(Stroke::new(1.0, color)),
                fill: filled.then_some(color),
            });
        }

        shapes
    }
}
