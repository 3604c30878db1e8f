//! Persistent sand raster for the zen garden
//!
//! The ball presses its footprint into this buffer every frame and the whole
//! buffer is pulled back toward the sand color by one low-alpha overlay, so
//! old marks fade out over a few seconds.

use glam::Vec2;
use rand::Rng;

use super::bounds::Bounds;
use crate::consts::*;
use crate::error::Result;
use crate::renderer::{Canvas, Color};

/// Off-screen pixel buffer covering exactly the current bounds
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    canvas: Canvas,
    /// Surface position of the buffer's top-left pixel
    origin: Vec2,
}

impl TrailBuffer {
    /// Allocate a buffer for `bounds`, fill it with sand and scatter speckles
    pub fn new<R: Rng>(rng: &mut R, bounds: &Bounds, base: Color) -> Result<Self> {
        let (width, height) = bounds.pixel_size();
        let mut canvas = Canvas::try_new(width, height, base)?;
        speckle(&mut canvas, rng, base);

        Ok(Self {
            canvas,
            origin: bounds.min(),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// One fade step toward `base`
    pub fn fade(&mut self, base: Color) {
        self.canvas.overlay(base.with_alpha(TRAIL_FADE_ALPHA));
    }

    /// Stamp a filled circle given in surface coordinates
    pub fn stamp(&mut self, center: Vec2, radius: f32, color: Color) {
        self.canvas.fill_circle(center - self.origin, radius, color);
    }

    /// Copy the buffer onto the output surface at its bounds
    pub fn blit_to(&self, out: &mut Canvas) {
        let origin = (self.origin.x.round() as i32, self.origin.y.round() as i32);
        out.blit(&self.canvas, origin);
    }
}

/// Number of speckles for a buffer of the given size
pub fn speckle_count(width: u32, height: u32) -> u32 {
    ((width as u64 * height as u64) / SPECKLE_DENSITY_FACTOR as u64) as u32
}

/// One-time texture pass: small dots jittered around the base color
fn speckle<R: Rng>(canvas: &mut Canvas, rng: &mut R, base: Color) {
    let (w, h) = (canvas.width(), canvas.height());
    if w == 0 || h == 0 {
        return;
    }

    for _ in 0..speckle_count(w, h) {
        let pos = Vec2::new(
            rng.random_range(0.0..w as f32),
            rng.random_range(0.0..h as f32),
        );
        let radius = rng.random_range(0.5..=SPECKLE_MAX_RADIUS);
        let color = base.offset(
            rng.random_range(-SPECKLE_JITTER..=SPECKLE_JITTER),
            rng.random_range(-SPECKLE_JITTER..=SPECKLE_JITTER),
            rng.random_range(-SPECKLE_JITTER..=SPECKLE_JITTER),
        );
        canvas.fill_circle(pos, radius, color);
    }
}
