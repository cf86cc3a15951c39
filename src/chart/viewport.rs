//! Visible-range windowing and pinch-to-zoom state.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Smallest allowed per-item footprint, in pixels.
pub const MIN_PITCH: f32 = 1.0;
/// Largest allowed per-item footprint, in pixels.
pub const MAX_PITCH: f32 = 40.0;

/// Scroll/zoom state of the chart: viewport size, horizontal scroll
/// offset and the per-item pitch (candle width + gap).
///
/// All range math here is O(1) arithmetic; it is re-derived on every
/// scroll and pinch frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub offset: f32,
    pub pitch: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pitch: f32) -> Self {
        Self {
            width,
            height,
            offset: 0.0,
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
        }
    }

    /// Total scrollable content width, never narrower than the viewport.
    pub fn content_width(&self, item_count: usize) -> f32 {
        (item_count as f32 * self.pitch).max(self.width)
    }

    pub fn max_offset(&self, item_count: usize) -> f32 {
        (self.content_width(item_count) - self.width).max(0.0)
    }

    pub fn clamp_offset(&mut self, item_count: usize) {
        self.offset = self.offset.clamp(0.0, self.max_offset(item_count));
    }

    /// The half-open index range of items intersecting the viewport,
    /// with a one-item leading and trailing overscan margin so fast
    /// scrolling never clips an edge item.
    pub fn visible_range(&self, item_count: usize) -> Range<usize> {
        if item_count == 0 || self.pitch <= 0.0 || self.width <= 0.0 {
            return 0..0;
        }

        let to_draw = (self.width / self.pitch).ceil() as usize + 2;
        let offset = self.offset.max(0.0);
        let start = ((offset / self.pitch).floor() as isize - 1).max(0) as usize;
        if start >= item_count {
            return 0..0;
        }

        start..(start + to_draw).min(item_count)
    }
}

/// Pinch-to-zoom gesture state.
///
/// While pinching, each scale change re-derives the pitch (clamped to
/// `[MIN_PITCH, MAX_PITCH]`), recomputes the content width and
/// re-anchors the scroll offset so the pinch midpoint stays visually
/// fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PinchState {
    #[default]
    Idle,
    Pinching {
        /// Two-finger midpoint, in viewport coordinates
        center_x: f32,
        /// Accumulated gesture scale at the last change
        last_scale: f32,
    },
}

impl PinchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self, PinchState::Pinching { .. })
    }

    /// Gesture began: capture the midpoint and reset the accumulator.
    /// The host disables normal scrolling for the duration.
    pub fn begin(&mut self, center_x: f32) {
        *self = PinchState::Pinching {
            center_x,
            last_scale: 1.0,
        };
    }

    /// Gesture changed. Returns `true` when the viewport was modified
    /// and the host should redraw.
    pub fn change(&mut self, scale: f32, viewport: &mut Viewport, item_count: usize) -> bool {
        let PinchState::Pinching { center_x, last_scale } = *self else {
            return false;
        };

        let delta = scale - last_scale;
        *self = PinchState::Pinching {
            center_x,
            last_scale: scale,
        };

        let new_pitch = (viewport.pitch * (1.0 + delta)).clamp(MIN_PITCH, MAX_PITCH);
        if new_pitch == viewport.pitch {
            return false;
        }

        let old_content = viewport.content_width(item_count);
        // Content-space position under the pinch midpoint
        let anchor = viewport.offset + center_x;

        viewport.pitch = new_pitch;
        let new_content = viewport.content_width(item_count);

        let mut offset = anchor * (new_content / old_content) - center_x;
        offset = offset.clamp(0.0, viewport.max_offset(item_count));
        viewport.offset = offset;
        true
    }

    /// Gesture ended; the host re-enables normal scrolling.
    pub fn end(&mut self) {
        *self = PinchState::Idle;
    }
}
