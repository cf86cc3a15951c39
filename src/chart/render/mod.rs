//! Keyed drawing units and their registry.
//!
//! Each indicator family owns one renderer. Renderers are stateless
//! with respect to data: everything they need arrives per frame through
//! the [`RenderContext`], and they emit back-end neutral [`Shape`]s.

pub mod candle;
pub mod line;
pub mod macd;
pub mod rsi;
pub mod vol;

pub use candle::CandleRenderer;
pub use line::ScalarLineRenderer;
pub use macd::MacdRenderer;
pub use rsi::RsiRenderer;
pub use vol::VolRenderer;

use tracing::debug;

use crate::bar::{Bar, MetricBounds};
use crate::indicator::{IndicatorData, IndicatorKey, IndicatorType};
use crate::style::StyleConfig;

use super::primitives::{Point, Rect, Shape, Stroke};
use super::transform::Transformer;

/// Everything a drawing unit needs for one frame: the pane rect, the
/// coordinate transformer and the visible slices. Coordinates produced
/// against this context are local to `rect`.
pub struct RenderContext<'a> {
    pub rect: Rect,
    pub transformer: &'a Transformer,
    pub bars: &'a [Bar],
    pub data: &'a [IndicatorData],
    pub styles: &'a StyleConfig,
}

impl RenderContext<'_> {
    /// Candle body width at the current zoom level.
    pub fn body_width(&self) -> f32 {
        (self.transformer.pitch() - self.styles.candle.gap).max(1.0)
    }

    /// X of the body center of the visible item at `local_index`.
    pub fn center_x(&self, local_index: usize) -> f32 {
        self.transformer.x_for(local_index) + self.body_width() * 0.5
    }
}

/// A single drawing unit keyed by indicator family.
pub trait Renderer: Send {
    /// Family identity used by the registry; `None` for the candle
    /// body itself.
    fn indicator_type(&self) -> Option<IndicatorType>;

    /// Contribution of this unit to its pane's value bounds over the
    /// visible slice.
    fn value_bounds(&self, bars: &[Bar], data: &[IndicatorData]) -> Option<MetricBounds>;

    fn draw(&self, ctx: &RenderContext<'_>) -> Vec<Shape>;
}

/// An ordered, key-deduplicated renderer collection; semantics mirror
/// the calculator registry (duplicate install and absent remove are
/// no-ops).
#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, renderer: Box<dyn Renderer>) {
        if self.contains(renderer.indicator_type()) {
            debug!(indicator = ?renderer.indicator_type(), "renderer already installed");
            return;
        }
        self.renderers.push(renderer);
    }

    pub fn remove(&mut self, indicator_type: Option<IndicatorType>) {
        self.renderers.retain(|renderer| renderer.indicator_type() != indicator_type);
    }

    pub fn contains(&self, indicator_type: Option<IndicatorType>) -> bool {
        self.renderers
            .iter()
            .any(|renderer| renderer.indicator_type() == indicator_type)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Renderer> {
        self.renderers.iter().map(Box::as_ref)
    }
}

/// Polylines for one scalar indicator key over the visible slice, one
/// segment per contiguous run of defined values. A missing value splits
/// the line into a gap instead of interpolating across it.
pub(crate) fn scalar_polylines(
    ctx: &RenderContext<'_>,
    key: IndicatorKey,
    stroke: Stroke,
) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let mut run: Vec<Point> = Vec::new();

    for (idx, item) in ctx.data.iter().enumerate() {
        match item.scalar(key) {
            Some(value) => {
                run.push(Point::new(ctx.center_x(idx), ctx.transformer.y_for(value)));
            }
            None => flush_run(&mut shapes, &mut run, stroke),
        }
    }
    flush_run(&mut shapes, &mut run, stroke);

    shapes
}

fn flush_run(shapes: &mut Vec<Shape>, run: &mut Vec<Point>, stroke: Stroke) {
    if run.len() >= 2 {
        shapes.push(Shape::Polyline {
            points: std::mem::take(run),
            stroke,
        });
    } else {
        run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_dedup_and_remove() {
        let mut registry = RendererRegistry::new();
        registry.install(Box::new(VolRenderer::new()));
        registry.install(Box::new(VolRenderer::new()));
        assert_eq!(registry.len(), 1);

        registry.install(Box::new(RsiRenderer::new()));
        assert_eq!(registry.len(), 2);

        registry.remove(Some(IndicatorType::Macd));
        assert_eq!(registry.len(), 2);

        registry.remove(Some(IndicatorType::Vol));
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(Some(IndicatorType::Vol)));
    }

    #[test]
    fn test_candle_identity_is_none() {
        let mut registry = RendererRegistry::new();
        registry.install(Box::new(CandleRenderer::new()));
        assert!(registry.contains(None));
        registry.install(Box::new(CandleRenderer::new()));
        assert_eq!(registry.len(), 1);
    }
}
