//! Drifting particle for the fluid scenes

use glam::Vec2;
use rand::Rng;

use super::bounds::Bounds;
use crate::consts::*;
use crate::renderer::{Canvas, Color};

/// A single drifting circle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    pub radius: f32,
    /// Alpha applied to the base color when drawn
    pub opacity: u8,
}

impl Particle {
    /// Random particle somewhere inside `bounds`
    ///
    /// `bounds` must be valid.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: &Bounds) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(bounds.left..bounds.right),
                rng.random_range(bounds.top..bounds.bottom),
            ),
            vel: Vec2::new(
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            ),
            radius: rng.random_range(PARTICLE_MIN_RADIUS..=PARTICLE_MAX_RADIUS),
            opacity: rng.random_range(PARTICLE_MIN_OPACITY..=PARTICLE_MAX_OPACITY),
        }
    }

    /// Create the particle pool for a fluid scene
    pub fn spawn_pool<R: Rng>(rng: &mut R, bounds: &Bounds, count: usize) -> Vec<Particle> {
        if !bounds.is_valid() {
            return Vec::new();
        }
        (0..count).map(|_| Self::spawn(rng, bounds)).collect()
    }

    /// Drift, wrapping around to the opposite edge once fully off-screen
    pub fn advance(&mut self, elapsed_ms: f32, bounds: &Bounds) {
        self.pos += self.vel * (elapsed_ms / 1000.0) * SPEED_SCALE;

        let r = self.radius;
        self.pos.x = wrap(self.pos.x, bounds.left, bounds.right, r);
        self.pos.y = wrap(self.pos.y, bounds.top, bounds.bottom, r);
    }

    pub fn draw(&self, canvas: &mut Canvas, base_color: Color) {
        canvas.fill_circle(self.pos, self.radius, base_color.with_alpha(self.opacity));
    }
}

/// Wrap one coordinate: past `max + r` reappears at `min - r` and vice versa
#[inline]
fn wrap(v: f32, min: f32, max: f32, r: f32) -> f32 {
    if v < min - r {
        max + r
    } else if v > max + r {
        min - r
    } else {
        v
    }
}
