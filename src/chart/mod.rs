//! Chart composition: pane layout, scrolling, zooming and drawing.

pub mod primitives;
pub mod render;
pub mod transform;
pub mod viewport;

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bar::{Bar, MetricBounds};
use crate::datasource::{DataSource, RecomputeJob, RecomputeOutcome};
use crate::indicator::{calculators_for, IndicatorType};
use crate::style::StyleConfig;

use primitives::{Color, Rect, Shape};
use render::{
    CandleRenderer, MacdRenderer, RenderContext, Renderer, RendererRegistry, RsiRenderer,
    ScalarLineRenderer, VolRenderer,
};
use transform::Transformer;
use viewport::{PinchState, Viewport};

/// Where the chart scrolls to after a data reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollPosition {
    /// Oldest bar at the left edge
    Start,
    /// Newest bar at the right edge
    End,
    /// Keep the current offset, clamped to the new content width
    Keep,
}

/// One pane's worth of drawing output for a frame. `rect` positions the
/// pane in viewport coordinates; shape coordinates are local to it.
#[derive(Debug)]
pub struct PaneFrame {
    pub rect: Rect,
    /// `None` for the main price pane
    pub indicator: Option<IndicatorType>,
    pub shapes: Vec<Shape>,
}

/// One legend line: "MA5  101.23" in the key's line color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub value: String,
    pub color: Color,
}

/// The chart itself: owns the data source, the renderer registries and
/// the scroll/zoom state, and composes panes into frames.
///
/// The view is a state machine driven by the host: feed it data and
/// gestures, then call [`draw`](Self::draw) to get the frame's shapes.
/// It performs no I/O and owns no threads; the staged-reload path hands
/// the host a [`RecomputeJob`] to run wherever it likes.
pub struct ChartView {
    source: DataSource,
    styles: StyleConfig,
    main_renderers: RendererRegistry,
    sub_renderers: RendererRegistry,
    /// Families currently shown, in installation order
    displayed: Vec<IndicatorType>,
    viewport: Viewport,
    pinch: PinchState,
    /// Fraction of the viewport height given to each sub pane
    sub_pane_ratio: f32,
}

impl ChartView {
    /// A chart sized to the host surface, showing candles with the
    /// default volume and MA overlays.
    pub fn with_size(styles: StyleConfig, width: f32, height: f32) -> Self {
        let pitch = styles.candle.pitch();
        let mut view = Self {
            source: DataSource::new(),
            styles,
            main_renderers: RendererRegistry::new(),
            sub_renderers: RendererRegistry::new(),
            displayed: Vec::new(),
            viewport: Viewport::new(width, height, pitch),
            pinch: PinchState::new(),
            sub_pane_ratio: 0.25,
        };
        view.main_renderers.install(Box::new(CandleRenderer::new()));
        view.show_indicator(IndicatorType::Vol);
        view.show_indicator(IndicatorType::Ma);
        view
    }

    pub fn data_source(&self) -> &DataSource {
        &self.source
    }

    pub fn styles(&self) -> &StyleConfig {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleConfig {
        &mut self.styles
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn displayed_indicators(&self) -> &[IndicatorType] {
        &self.displayed
    }

    /// Host surface resized.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.clamp_offset(self.source.len());
    }

    /// Replace the bar list, recompute every displayed indicator
    /// synchronously and scroll to `position`.
    pub fn reload_data(&mut self, bars: Vec<Bar>, position: ScrollPosition) {
        info!(bars = bars.len(), "reloading chart data");
        self.source.update(bars);
        self.scroll_to(position);
    }

    /// Stage a reload whose recompute runs off the owning context, e.g.
    /// inside `tokio::task::spawn_blocking`.
    pub fn stage_reload(&mut self, bars: Vec<Bar>) -> RecomputeJob {
        self.source.stage(bars)
    }

    /// Publish a finished staged reload. Stale outcomes are discarded
    /// and leave the chart untouched; see [`DataSource::commit`].
    pub fn commit_reload(&mut self, outcome: RecomputeOutcome, position: ScrollPosition) -> bool {
        if !self.source.commit(outcome) {
            return false;
        }
        self.scroll_to(position);
        true
    }

    fn scroll_to(&mut self, position: ScrollPosition) {
        match position {
            ScrollPosition::Start => self.viewport.offset = 0.0,
            ScrollPosition::End => {
                self.viewport.offset = self.viewport.max_offset(self.source.len());
            }
            ScrollPosition::Keep => {}
        }
        self.viewport.clamp_offset(self.source.len());
    }

    /// Host scroll gesture; ignored mid-pinch.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        if self.pinch.is_pinching() {
            return;
        }
        self.viewport.offset = offset;
        self.viewport.clamp_offset(self.source.len());
    }

    pub fn pinch_begin(&mut self, center_x: f32) {
        self.pinch.begin(center_x);
    }

    /// Returns `true` when the viewport changed and a redraw is due.
    pub fn pinch_change(&mut self, scale: f32) -> bool {
        let item_count = self.source.len();
        self.pinch.change(scale, &mut self.viewport, item_count)
    }

    pub fn pinch_end(&mut self) {
        self.pinch.end();
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.viewport.visible_range(self.source.len())
    }

    /// Show an indicator family: install its calculators and renderer,
    /// then recompute the current bars so values appear immediately.
    pub fn show_indicator(&mut self, indicator_type: IndicatorType) {
        for calculator in calculators_for(indicator_type) {
            self.source.install_calculator(calculator);
        }

        let renderer: Box<dyn Renderer> = match indicator_type {
            IndicatorType::Vol => Box::new(VolRenderer::new()),
            IndicatorType::Ma => Box::new(ScalarLineRenderer::new(IndicatorType::Ma)),
            IndicatorType::Ema => Box::new(ScalarLineRenderer::new(IndicatorType::Ema)),
            IndicatorType::Rsi => Box::new(RsiRenderer::new()),
            IndicatorType::Macd => Box::new(MacdRenderer::new()),
        };
        if indicator_type.is_main_pane() {
            self.main_renderers.install(renderer);
        } else {
            self.sub_renderers.install(renderer);
        }

        if !self.displayed.contains(&indicator_type) {
            self.displayed.push(indicator_type);
        }
        self.recompute();
    }

    /// Hide an indicator family: remove its calculators and renderer
    /// and drop its values from the decorated data.
    pub fn hide_indicator(&mut self, indicator_type: IndicatorType) {
        for key in indicator_type.keys() {
            self.source.remove_calculator(key);
        }
        if indicator_type.is_main_pane() {
            self.main_renderers.remove(Some(indicator_type));
        } else {
            self.sub_renderers.remove(Some(indicator_type));
        }
        self.displayed.retain(|displayed| *displayed != indicator_type);
        self.recompute();
    }

    fn recompute(&mut self) {
        if self.source.is_empty() {
            return;
        }
        let bars = self.source.bars().to_vec();
        self.source.update(bars);
    }

    /// Sub-pane families in display order that have a renderer mounted.
    fn sub_panes(&self) -> Vec<IndicatorType> {
        self.displayed
            .iter()
            .copied()
            .filter(|family| !family.is_main_pane() && self.sub_renderers.contains(Some(*family)))
            .collect()
    }

    /// Compose the frame: one main pane plus one pane per displayed
    /// sub-pane family, each with its own value axis.
    pub fn draw(&self) -> Vec<PaneFrame> {
        let range = self.visible_range();
        if range.is_empty() {
            return Vec::new();
        }

        let bars = &self.source.bars()[range.clone()];
        let data = &self.source.decorated()[range.clone()];
        let pitch = self.viewport.pitch;
        let pane_x = range.start as f32 * pitch - self.viewport.offset;
        let pane_width = bars.len() as f32 * pitch;

        let sub_panes = self.sub_panes();
        let sub_height = self.viewport.height * self.sub_pane_ratio;
        let main_height =
            (self.viewport.height - sub_panes.len() as f32 * sub_height).max(0.0);

        let mut frames = Vec::with_capacity(1 + sub_panes.len());

        // Main pane: candles plus overlays share one value axis
        let main_rect = Rect::new(pane_x, 0.0, pane_width, main_height);
        let main_bounds = self
            .main_renderers
            .iter()
            .filter_map(|renderer| renderer.value_bounds(bars, data))
            .reduce(MetricBounds::combined)
            .unwrap_or(MetricBounds::new(0.0, 0.0));
        let transformer = Transformer::new(pitch, main_bounds, main_rect);
        let ctx = RenderContext {
            rect: main_rect,
            transformer: &transformer,
            bars,
            data,
            styles: &self.styles,
        };
        let mut shapes = Vec::new();
        for renderer in self.main_renderers.iter() {
            shapes.extend(renderer.draw(&ctx));
        }
        frames.push(PaneFrame {
            rect: main_rect,
            indicator: None,
            shapes,
        });

        for (slot, family) in sub_panes.into_iter().enumerate() {
            let Some(renderer) = self
                .sub_renderers
                .iter()
                .find(|renderer| renderer.indicator_type() == Some(family))
            else {
                continue;
            };

            let rect = Rect::new(
                pane_x,
                main_height + slot as f32 * sub_height,
                pane_width,
                sub_height,
            );
            let bounds = renderer
                .value_bounds(bars, data)
                .unwrap_or(MetricBounds::new(0.0, 0.0));
            let transformer = Transformer::new(pitch, bounds, rect);
            let ctx = RenderContext {
                rect,
                transformer: &transformer,
                bars,
                data,
                styles: &self.styles,
            };
            frames.push(PaneFrame {
                rect,
                indicator: Some(family),
                shapes: renderer.draw(&ctx),
            });
        }

        frames
    }

    /// Legend lines for the newest visible item, one per displayed key.
    /// MACD expands to its three fields (DIF, DEA, MACD). Keys with no
    /// value at that position are skipped.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let range = self.visible_range();
        let Some(item) = range.last().and_then(|idx| self.source.decorated().get(idx)) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for family in &self.displayed {
            for key in family.keys() {
                if self.styles.style_for(key).is_none() {
                    continue;
                }

                if *family == IndicatorType::Macd {
                    let Some(value) = item.macd(key) else { continue };
                    let macd_style = self.styles.macd;
                    let histogram_color = if value.histogram >= 0.0 {
                        self.styles.candle.up_color
                    } else {
                        self.styles.candle.down_color
                    };
                    entries.push(LegendEntry {
                        label: "DIF".to_string(),
                        value: format!("{:.2}", value.macd),
                        color: macd_style.dif_color,
                    });
                    entries.push(LegendEntry {
                        label: "DEA".to_string(),
                        value: format!("{:.2}", value.signal),
                        color: macd_style.dea_color,
                    });
                    entries.push(LegendEntry {
                        label: "MACD".to_string(),
                        value: format!("{:.2}", value.histogram),
                        color: histogram_color,
                    });
                    continue;
                }

                let value = match family {
                    IndicatorType::Vol => Some(format!("{}", item.bar().volume)),
                    _ => item.scalar(key).map(|value| format!("{:.2}", value)),
                };
                let Some(value) = value else { continue };
                let Some(style) = self.styles.style_for(key) else { continue };
                entries.push(LegendEntry {
                    label: key.to_string(),
                    value,
                    color: style.color,
                });
            }
        }
        entries
    }
}
