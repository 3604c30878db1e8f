//! Drawable area rectangle

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds anchored at the origin
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Finite edges enclosing a non-zero, non-negative area
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// Whether these bounds are valid and lie inside a `width` x `height` surface
    pub fn fits_within(&self, width: f32, height: f32) -> bool {
        self.is_valid()
            && self.left >= 0.0
            && self.top >= 0.0
            && self.right <= width
            && self.bottom <= height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Pixel dimensions of a raster covering these bounds
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width().max(0.0).round() as u32,
            self.height().max(0.0).round() as u32,
        )
    }
}
