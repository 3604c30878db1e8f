//! Scene state machine
//!
//! Exactly one background scene is live at a time. Its resources (particle
//! pool, or ball plus trail buffer) live inside the `Scene` variant, so a
//! transition drops the old variant before the new one is built and the two
//! resource kinds can never coexist.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bounds::Bounds;
use super::interaction;
use super::particle::Particle;
use super::trail::TrailBuffer;
use crate::consts::*;
use crate::error::Result;
use crate::renderer::{Canvas, Color};
use crate::style::palette;

/// User-selectable background scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Flat background, no animation
    #[default]
    Static,
    /// Drifting particles
    FluidMotion,
    /// Drifting particles that scatter on tap
    FluidTouch,
    /// Ball rolling through sand
    ZenGarden,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Static,
        SceneKind::FluidMotion,
        SceneKind::FluidTouch,
        SceneKind::ZenGarden,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Static => "static",
            SceneKind::FluidMotion => "fluid_motion",
            SceneKind::FluidTouch => "fluid_touch",
            SceneKind::ZenGarden => "zen_garden",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "static" | "none" => Some(SceneKind::Static),
            "fluid_motion" | "fluid" => Some(SceneKind::FluidMotion),
            "fluid_touch" | "touch" => Some(SceneKind::FluidTouch),
            "zen_garden" | "zen" | "sand" => Some(SceneKind::ZenGarden),
            _ => None,
        }
    }

    /// Map a stored numeric id; unknown ids resolve to `Static`
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => SceneKind::FluidMotion,
            2 => SceneKind::FluidTouch,
            3 => SceneKind::ZenGarden,
            _ => SceneKind::Static,
        }
    }

    /// Whether frames depend on elapsed time
    pub fn is_animated(&self) -> bool {
        *self != SceneKind::Static
    }

    /// Whether taps perturb the scene
    pub fn is_touch_reactive(&self) -> bool {
        *self == SceneKind::FluidTouch
    }

    /// Flat color drawn when the scene has nothing else to show
    pub fn base_color(&self) -> Color {
        match self {
            SceneKind::Static => palette::STATIC_BACKGROUND,
            SceneKind::FluidMotion | SceneKind::FluidTouch => palette::FLUID_BACKGROUND,
            SceneKind::ZenGarden => palette::SAND,
        }
    }
}

/// Ball and the sand it rolls through
#[derive(Debug, Clone)]
pub struct Garden {
    pub ball: Ball,
    pub trail: TrailBuffer,
}

/// Live scene with its owned resources
#[derive(Debug, Clone)]
pub enum Scene {
    Static,
    /// Pool is empty until bounds are valid
    Fluid { touch: bool, particles: Vec<Particle> },
    /// `None` until bounds are valid, or after the trail buffer failed to allocate
    ZenGarden(Option<Garden>),
}

impl Scene {
    /// Empty scene of the given kind; resources come from `SceneState::rebuild`
    fn empty(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Static => Scene::Static,
            SceneKind::FluidMotion => Scene::Fluid {
                touch: false,
                particles: Vec::new(),
            },
            SceneKind::FluidTouch => Scene::Fluid {
                touch: true,
                particles: Vec::new(),
            },
            SceneKind::ZenGarden => Scene::ZenGarden(None),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Static => SceneKind::Static,
            Scene::Fluid { touch: false, .. } => SceneKind::FluidMotion,
            Scene::Fluid { touch: true, .. } => SceneKind::FluidTouch,
            Scene::ZenGarden(_) => SceneKind::ZenGarden,
        }
    }

    /// Whether the scene holds the resources it needs
    fn is_populated(&self) -> bool {
        match self {
            Scene::Static => true,
            Scene::Fluid { particles, .. } => !particles.is_empty(),
            Scene::ZenGarden(garden) => garden.is_some(),
        }
    }
}

/// Owner of the active scene, its bounds and its random source
#[derive(Debug)]
pub struct SceneState<R = Pcg32> {
    scene: Scene,
    bounds: Bounds,
    rng: R,
}

impl SceneState<Pcg32> {
    /// Scene state with a seeded PCG generator
    pub fn with_seed(kind: SceneKind, seed: u64) -> Self {
        Self::new(kind, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> SceneState<R> {
    /// Start in `kind` with no bounds; resources arrive with the first valid resize
    pub fn new(kind: SceneKind, rng: R) -> Self {
        Self {
            scene: Scene::empty(kind),
            bounds: Bounds::EMPTY,
            rng,
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.scene.kind()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.scene {
            Scene::Fluid { particles, .. } => particles,
            _ => &[],
        }
    }

    pub fn ball(&self) -> Option<&Ball> {
        match &self.scene {
            Scene::ZenGarden(Some(garden)) => Some(&garden.ball),
            _ => None,
        }
    }

    pub fn trail(&self) -> Option<&TrailBuffer> {
        match &self.scene {
            Scene::ZenGarden(Some(garden)) => Some(&garden.trail),
            _ => None,
        }
    }

    /// Switch scenes; selecting the active scene again is a no-op
    pub fn select(&mut self, kind: SceneKind) -> Result<()> {
        if kind == self.kind() {
            return Ok(());
        }
        log::info!("Scene {} -> {}", self.kind().as_str(), kind.as_str());
        self.rebuild(kind)
    }

    /// Adopt new bounds, rebuilding the scene's resources for them
    ///
    /// Repeating a resize with unchanged bounds keeps the existing resources.
    pub fn resize(&mut self, bounds: Bounds) -> Result<()> {
        if bounds == self.bounds && self.scene.is_populated() {
            return Ok(());
        }
        log::info!(
            "Resize {}x{} -> {}x{}",
            self.bounds.width(),
            self.bounds.height(),
            bounds.width(),
            bounds.height()
        );
        self.bounds = bounds;
        self.rebuild(self.kind())
    }

    /// Tear down the current resources, then allocate those `kind` needs
    fn rebuild(&mut self, kind: SceneKind) -> Result<()> {
        // Drop first so peak memory never holds two scenes' resources
        self.scene = Scene::empty(kind);

        if !self.bounds.is_valid() {
            log::debug!("Deferring {} setup until bounds are valid", kind.as_str());
            return Ok(());
        }

        match &mut self.scene {
            Scene::Static => {}
            Scene::Fluid { particles, .. } => {
                *particles = Particle::spawn_pool(&mut self.rng, &self.bounds, NUM_PARTICLES);
            }
            Scene::ZenGarden(garden) => {
                let trail = match TrailBuffer::new(&mut self.rng, &self.bounds, palette::SAND) {
                    Ok(trail) => trail,
                    Err(e) => {
                        log::error!("{e}; falling back to plain sand");
                        return Err(e);
                    }
                };
                let ball = Ball::spawn(&mut self.rng, &self.bounds);
                *garden = Some(Garden { ball, trail });
            }
        }
        Ok(())
    }

    /// Advance the active scene and draw its background into `canvas`
    ///
    /// Entities stay frozen while `low_power` is set.
    pub fn advance_and_draw(
        &mut self,
        elapsed_ms: f32,
        canvas: &mut Canvas,
        accent: Color,
        low_power: bool,
    ) {
        let bounds = self.bounds;
        let base = self.kind().base_color();
        canvas.fill(base);

        match &mut self.scene {
            Scene::Static | Scene::ZenGarden(None) => {}
            Scene::Fluid { particles, .. } if !low_power => {
                for particle in particles.iter_mut() {
                    particle.advance(elapsed_ms, &bounds);
                    particle.draw(canvas, accent);
                }
            }
            Scene::Fluid { .. } => {}
            Scene::ZenGarden(Some(garden)) => {
                draw_garden(garden, elapsed_ms, &bounds, canvas, low_power)
            }
        }
    }

    /// Draw the ball on the output surface, above the blitted sand
    pub fn draw_ball_overlay(&self, canvas: &mut Canvas) {
        if let Some(ball) = self.ball() {
            ball.draw(canvas, palette::BALL_BODY, palette::BALL_HIGHLIGHT);
        }
    }

    /// Scatter particles away from a tap; returns how many were moved
    pub fn on_tap(&mut self, x: f32, y: f32, low_power: bool) -> usize {
        match &mut self.scene {
            Scene::Fluid {
                touch: true,
                particles,
            } if !low_power => interaction::scatter(particles, glam::Vec2::new(x, y)),
            _ => 0,
        }
    }
}

fn draw_garden(
    garden: &mut Garden,
    elapsed_ms: f32,
    bounds: &Bounds,
    canvas: &mut Canvas,
    low_power: bool,
) {
    garden.trail.fade(palette::SAND);
    if !low_power {
        garden.ball.advance(elapsed_ms, bounds);
        garden.ball.draw_trail(&mut garden.trail, palette::SAND_TRAIL);
    }
    garden.trail.blit_to(canvas);
}
