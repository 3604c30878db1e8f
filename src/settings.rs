//! Face preferences
//!
//! Supplied by the host's preference store. Scene and theme may arrive as
//! names or numeric ids; anything unrecognised resolves to a fallback rather
//! than an error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::sim::SceneKind;
use crate::style::ColorTheme;

/// Face settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background scene
    #[serde(deserialize_with = "scene_or_static")]
    pub scene: SceneKind,
    /// Accent color theme
    #[serde(deserialize_with = "theme_or_white")]
    pub theme: ColorTheme,
    /// 24-hour time text
    pub use_24_hour: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::Static,
            theme: ColorTheme::Dynamic,
            use_24_hour: true,
        }
    }
}

impl Settings {
    pub fn new(scene: SceneKind, theme: ColorTheme) -> Self {
        Self {
            scene,
            theme,
            ..Self::default()
        }
    }

    /// Decode a preference payload; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings: scene={}, theme={}",
            settings.scene.as_str(),
            settings.theme.as_str()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn scene_or_static<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SceneKind, D::Error> {
    let scene = match Value::deserialize(d)? {
        Value::String(s) => SceneKind::from_str(&s),
        Value::Number(n) => n.as_i64().map(SceneKind::from_id),
        _ => None,
    };
    Ok(scene.unwrap_or_else(|| {
        log::warn!("Unknown scene selection, using static");
        SceneKind::Static
    }))
}

fn theme_or_white<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<ColorTheme, D::Error> {
    let theme = match Value::deserialize(d)? {
        Value::String(s) => ColorTheme::from_str(&s),
        Value::Number(n) => n.as_i64().map(ColorTheme::from_id),
        _ => None,
    };
    Ok(theme.unwrap_or_else(|| {
        log::warn!("Unknown color theme, using white");
        ColorTheme::White
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.scene, SceneKind::Static);
        assert_eq!(s.theme, ColorTheme::Dynamic);
        assert_eq!(Settings::from_json("{}").unwrap(), s);
    }

    #[test]
    fn test_names_and_ids() {
        let s = Settings::from_json(r#"{"scene": "zen_garden", "theme": 2}"#).unwrap();
        assert_eq!(s.scene, SceneKind::ZenGarden);
        assert_eq!(s.theme, ColorTheme::SkyBlue);

        let s = Settings::from_json(r#"{"scene": 2, "theme": "orange", "use_24_hour": false}"#)
            .unwrap();
        assert_eq!(s.scene, SceneKind::FluidTouch);
        assert_eq!(s.theme, ColorTheme::Orange);
        assert!(!s.use_24_hour);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let s = Settings::from_json(r#"{"scene": "lava_lamp", "theme": "plaid"}"#).unwrap();
        assert_eq!(s.scene, SceneKind::Static);
        assert_eq!(s.theme, ColorTheme::White);

        let s = Settings::from_json(r#"{"scene": null, "theme": 17}"#).unwrap();
        assert_eq!(s.scene, SceneKind::Static);
        assert_eq!(s.theme, ColorTheme::White);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{scene").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings::new(SceneKind::FluidMotion, ColorTheme::Mint);
        assert_eq!(Settings::from_json(&s.to_json().unwrap()).unwrap(), s);
    }
}
