//! Tap interaction for the touch-reactive fluid scene

use glam::Vec2;

use super::particle::Particle;
use crate::consts::{INTERACTION_RADIUS, SCATTER_SPEED};

/// Push every particle near `tap` straight away from it
///
/// The new velocity replaces the old one. A particle sitting exactly on the
/// tap point has no direction and is left alone. Returns the number moved.
pub fn scatter(particles: &mut [Particle], tap: Vec2) -> usize {
    let mut moved = 0;
    for particle in particles.iter_mut() {
        let offset = particle.pos - tap;
        let dist = offset.length();
        if dist > 0.0 && dist < INTERACTION_RADIUS {
            particle.vel = offset / dist * SCATTER_SPEED;
            moved += 1;
        }
    }
    log::debug!("Tap at ({}, {}) scattered {moved} particles", tap.x, tap.y);
    moved
}
