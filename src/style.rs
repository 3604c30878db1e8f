//! Color themes and fixed palette
//!
//! Accent resolution is a pure function of the theme selection and the hour
//! of day. Everything else on the face uses the fixed palette below.

use serde::{Deserialize, Serialize};

use crate::renderer::Color;

/// Fixed palette
pub mod palette {
    use crate::renderer::Color;

    pub const MINT: Color = Color::rgb(0x66, 0xFF, 0xCC);
    pub const SKY_BLUE: Color = Color::rgb(0x87, 0xCE, 0xEB);
    pub const ORANGE: Color = Color::rgb(0xFF, 0xA5, 0x00);
    pub const WHITE: Color = Color::WHITE;

    /// Date line, independent of theme
    pub const DATE_NEUTRAL: Color = Color::rgb(0xB0, 0xB0, 0xB0);

    pub const STATIC_BACKGROUND: Color = Color::rgb(0x10, 0x14, 0x1C);
    pub const FLUID_BACKGROUND: Color = Color::BLACK;

    pub const SAND: Color = Color::rgb(0xE2, 0xCF, 0xA8);
    pub const SAND_TRAIL: Color = Color::rgb(0xB8, 0xA2, 0x7A);
    pub const BALL_BODY: Color = Color::rgb(0x5A, 0x5F, 0x66);
    pub const BALL_HIGHLIGHT: Color = Color::rgb(0xD8, 0xDC, 0xE0);
}

/// User-selectable accent theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    /// Follows the time of day
    #[default]
    Dynamic,
    Mint,
    SkyBlue,
    Orange,
    White,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::Dynamic,
        ColorTheme::Mint,
        ColorTheme::SkyBlue,
        ColorTheme::Orange,
        ColorTheme::White,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Dynamic => "dynamic",
            ColorTheme::Mint => "mint",
            ColorTheme::SkyBlue => "sky_blue",
            ColorTheme::Orange => "orange",
            ColorTheme::White => "white",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "dynamic" | "auto" => Some(ColorTheme::Dynamic),
            "mint" => Some(ColorTheme::Mint),
            "sky_blue" | "skyblue" | "blue" => Some(ColorTheme::SkyBlue),
            "orange" => Some(ColorTheme::Orange),
            "white" => Some(ColorTheme::White),
            _ => None,
        }
    }

    /// Map a stored numeric id; unknown ids resolve to `White`
    pub fn from_id(id: i64) -> Self {
        match id {
            0 => ColorTheme::Dynamic,
            1 => ColorTheme::Mint,
            2 => ColorTheme::SkyBlue,
            3 => ColorTheme::Orange,
            _ => ColorTheme::White,
        }
    }
}

/// Accent color for time text and particles
pub fn resolve_accent_color(theme: ColorTheme, hour: u32) -> Color {
    match theme {
        ColorTheme::Dynamic => match hour {
            6..=11 => palette::SKY_BLUE,
            12..=17 => palette::ORANGE,
            _ => palette::MINT,
        },
        ColorTheme::Mint => palette::MINT,
        ColorTheme::SkyBlue => palette::SKY_BLUE,
        ColorTheme::Orange => palette::ORANGE,
        ColorTheme::White => palette::WHITE,
    }
}
