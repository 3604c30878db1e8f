//! Software rendering module
//!
//! CPU raster surfaces, colors and bitmap text. No GPU involvement: a frame is
//! a plain pixel buffer handed back to the host.

pub mod canvas;
pub mod color;
pub mod font;

pub use canvas::Canvas;
pub use color::Color;
