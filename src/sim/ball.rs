//! Bouncing ball for the zen garden

use glam::Vec2;
use rand::Rng;

use super::bounds::Bounds;
use super::trail::TrailBuffer;
use crate::consts::*;
use crate::renderer::{Canvas, Color};

/// The zen garden's rolling ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    pub radius: f32,
}

impl Ball {
    /// Ball at the center of `bounds`, heading in a random direction
    ///
    /// The radius shrinks on tiny surfaces so the ball always fits between walls.
    pub fn spawn<R: Rng>(rng: &mut R, bounds: &Bounds) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let radius = BALL_RADIUS.min(bounds.width().min(bounds.height()) / 4.0);
        Self {
            pos: bounds.center(),
            vel: Vec2::from_angle(angle) * BALL_SPEED,
            radius,
        }
    }

    /// Roll, reflecting off each wall the leading edge reaches
    pub fn advance(&mut self, elapsed_ms: f32, bounds: &Bounds) {
        self.pos += self.vel * (elapsed_ms / 1000.0) * SPEED_SCALE;

        let r = self.radius;
        if self.pos.x - r < bounds.left {
            self.pos.x = bounds.left + r;
            self.vel.x = -self.vel.x;
        } else if self.pos.x + r > bounds.right {
            self.pos.x = bounds.right - r;
            self.vel.x = -self.vel.x;
        }

        if self.pos.y - r < bounds.top {
            self.pos.y = bounds.top + r;
            self.vel.y = -self.vel.y;
        } else if self.pos.y + r > bounds.bottom {
            self.pos.y = bounds.bottom - r;
            self.vel.y = -self.vel.y;
        }
    }

    /// Draw the body plus a small gloss spot toward the top-left
    pub fn draw(&self, canvas: &mut Canvas, body_color: Color, highlight_color: Color) {
        canvas.fill_circle(self.pos, self.radius, body_color);

        let offset = Vec2::splat(-self.radius * BALL_HIGHLIGHT_OFFSET);
        canvas.fill_circle(
            self.pos + offset,
            self.radius * BALL_HIGHLIGHT_SCALE,
            highlight_color,
        );
    }

    /// Press the ball's footprint into the sand
    pub fn draw_trail(&self, trail: &mut TrailBuffer, trail_color: Color) {
        trail.stamp(self.pos, self.radius, trail_color);
    }
}
