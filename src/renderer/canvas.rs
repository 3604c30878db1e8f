//! Software raster surface
//!
//! Every face layer draws into a `Canvas`: the output frame handed over by the
//! host and the off-screen trail buffer of the zen garden. All draw calls take
//! their color explicitly; a canvas carries no paint state between calls.

use std::io::{self, Write};

use glam::Vec2;

use super::color::Color;
use crate::error::{FaceError, Result};

/// Opaque RGBA8 pixel buffer, row-major, origin at the top-left
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a canvas filled with `color`
    pub fn new(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.with_alpha(255); width as usize * height as usize],
        }
    }

    /// Create a canvas, reporting allocation failure instead of aborting
    pub fn try_new(width: u32, height: u32, color: Color) -> Result<Self> {
        let err = || FaceError::TrailAllocation { width, height };
        let len = (width as usize).checked_mul(height as usize).ok_or_else(err)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| err())?;
        pixels.resize(len, color.with_alpha(255));

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at (x, y), if inside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite every pixel
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.with_alpha(255));
    }

    /// Composite `color` over every pixel (single full-surface pass)
    pub fn overlay(&mut self, color: Color) {
        if color.a == 0 {
            return;
        }
        for px in &mut self.pixels {
            *px = px.blend(color);
        }
    }

    /// Composite a filled axis-aligned rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                let i = self.index(px as u32, py as u32);
                self.pixels[i] = self.pixels[i].blend(color);
            }
        }
    }

    /// Composite a filled circle, clipped to the canvas
    ///
    /// A pixel is covered when its center lies inside the circle.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || color.a == 0 {
            return;
        }

        let min_x = (center.x - radius).floor().max(0.0) as i64;
        let min_y = (center.y - radius).floor().max(0.0) as i64;
        let max_x = ((center.x + radius).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((center.y + radius).ceil() as i64).min(self.height as i64 - 1);
        let r2 = radius * radius;

        for py in min_y..=max_y {
            let dy = py as f32 + 0.5 - center.y;
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    let i = self.index(px as u32, py as u32);
                    self.pixels[i] = self.pixels[i].blend(color);
                }
            }
        }
    }

    /// Copy `src` onto this canvas with its top-left corner at `origin`
    pub fn blit(&mut self, src: &Canvas, origin: (i32, i32)) {
        let (ox, oy) = (origin.0 as i64, origin.1 as i64);
        let x0 = ox.max(0);
        let x1 = (ox + src.width as i64).min(self.width as i64);
        if x0 >= x1 {
            return;
        }

        for sy in 0..src.height as i64 {
            let dy = oy + sy;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            let src_row = src.index((x0 - ox) as u32, sy as u32);
            let dst_row = self.index(x0 as u32, dy as u32);
            let n = (x1 - x0) as usize;
            self.pixels[dst_row..dst_row + n].copy_from_slice(&src.pixels[src_row..src_row + n]);
        }
    }

    /// Write the canvas as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.pixels.chunks(self.width.max(1) as usize) {
            row.clear();
            row.extend(line.iter().flat_map(|c| [c.r, c.g, c.b]));
            out.write_all(&row)?;
        }
        Ok(())
    }
}
