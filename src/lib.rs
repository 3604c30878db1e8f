//! Zen Face - animated watch face backgrounds
//!
//! Core modules:
//! - `sim`: Scene simulation (particles, bouncing ball, trail buffer, scene state)
//! - `renderer`: Software canvas, colors and bitmap text
//! - `face`: Frame compositor and host entry points
//! - `style`: Accent color resolution
//! - `settings`: User preferences (scene and color theme)

pub mod clock;
pub mod error;
pub mod face;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod style;

pub use error::{FaceError, Result};
pub use face::{PowerMode, WatchFace, Widget};
pub use settings::Settings;
pub use sim::{Bounds, SceneKind};
pub use style::ColorTheme;

/// Face configuration constants
pub mod consts {
    /// Pixels per second for a unit of velocity
    pub const SPEED_SCALE: f32 = 30.0;
    /// Largest elapsed time applied in a single frame (ms)
    pub const MAX_FRAME_DELTA_MS: i64 = 100;

    /// Particles created when a fluid scene activates
    pub const NUM_PARTICLES: usize = 60;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 6.0;
    /// Initial velocity component range (+/-)
    pub const PARTICLE_MAX_SPEED: f32 = 1.0;
    pub const PARTICLE_MIN_OPACITY: u8 = 60;
    pub const PARTICLE_MAX_OPACITY: u8 = 220;

    /// Taps move particles within this distance (px)
    pub const INTERACTION_RADIUS: f32 = 60.0;
    /// Velocity magnitude given to scattered particles
    pub const SCATTER_SPEED: f32 = 3.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 9.0;
    pub const BALL_SPEED: f32 = 2.0;
    /// Highlight circle size relative to the ball radius
    pub const BALL_HIGHLIGHT_SCALE: f32 = 0.35;
    /// Highlight offset toward the top-left, relative to the ball radius
    pub const BALL_HIGHLIGHT_OFFSET: f32 = 0.3;

    /// One speckle per this many pixels of trail buffer area
    pub const SPECKLE_DENSITY_FACTOR: u32 = 40;
    /// Max per-channel speckle deviation from the sand color
    pub const SPECKLE_JITTER: i16 = 20;
    pub const SPECKLE_MAX_RADIUS: f32 = 1.5;
    /// Alpha of the per-frame fade-to-sand overlay
    pub const TRAIL_FADE_ALPHA: u8 = 8;
}

