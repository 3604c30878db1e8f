//! Scene simulation module
//!
//! Background entities and the state machine that owns them:
//! - Per-frame updates take elapsed milliseconds, never wall-clock time
//! - Randomness comes from an injected, seedable generator
//! - Resources live inside the active scene variant only

pub mod ball;
pub mod bounds;
pub mod interaction;
pub mod particle;
pub mod scene;
pub mod trail;

pub use ball::Ball;
pub use bounds::Bounds;
pub use interaction::scatter;
pub use particle::Particle;
pub use scene::{Garden, Scene, SceneKind, SceneState};
pub use trail::TrailBuffer;
