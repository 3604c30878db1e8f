//! RGBA8 color

use bytemuck::{Pod, Zeroable};

/// 8-bit per channel color, laid out as it sits in a canvas
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Add a signed offset to each color channel, clamped to [0, 255]
    pub fn offset(self, dr: i16, dg: i16, db: i16) -> Self {
        let ch = |c: u8, d: i16| (c as i16 + d).clamp(0, 255) as u8;
        Self {
            r: ch(self.r, dr),
            g: ch(self.g, dg),
            b: ch(self.b, db),
            a: self.a,
        }
    }

    /// Composite `src` over this (opaque) color using `src.a`
    #[inline]
    pub fn blend(self, src: Color) -> Color {
        match src.a {
            0 => self,
            255 => src.with_alpha(255),
            a => {
                let a = a as u16;
                let mix = |d: u8, s: u8| ((s as u16 * a + d as u16 * (255 - a) + 127) / 255) as u8;
                Color::rgb(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b))
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
