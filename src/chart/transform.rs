//! Data-to-pixel coordinate mapping.

use crate::bar::MetricBounds;

use super::primitives::Rect;

/// Value ranges narrower than this are treated as flat.
pub const FLAT_RANGE_EPSILON: f64 = 1e-9;

/// Maps (bar index, value) pairs to pixel coordinates for one pane.
///
/// `x_for` is relative to the pane rect's local origin; absolute
/// placement is the caller's job via the pane offset. `y_for` is the
/// standard inverted-axis linear interpolation over the value bounds.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    pitch: f32,
    bounds: MetricBounds,
    rect: Rect,
}

impl Transformer {
    pub fn new(pitch: f32, bounds: MetricBounds, rect: Rect) -> Self {
        Self { pitch, bounds, rect }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn bounds(&self) -> MetricBounds {
        self.bounds
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// X of the left edge of the item at `local_index`.
    pub fn x_for(&self, local_index: usize) -> f32 {
        local_index as f32 * self.pitch
    }

    /// Y for a data value. A degenerate range (max == min) maps every
    /// value to mid-height instead of dividing by zero.
    pub fn y_for(&self, value: f64) -> f32 {
        let distance = self.bounds.distance();
        if distance.abs() <= FLAT_RANGE_EPSILON {
            return self.rect.height * 0.5;
        }
        let ratio = (value - self.bounds.minimum) / distance;
        ((1.0 - ratio) * self.rect.height as f64) as f32
    }
}
