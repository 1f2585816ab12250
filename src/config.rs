use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::channels::{Oscillation, SwayConfig, TiltConfig};
use crate::animation::driver::DriverConfig;
use crate::animation::entrance::EntranceConfig;
use crate::animation::pose::Pose;
use crate::animation::reveal::RevealConfig;
use crate::camera::Camera;
use crate::page::PageConfig;

pub const DEFAULT_CONFIG_PATH: &str = "showcase.toml";

/// Top-level configuration. Every table is optional; missing fields fall
/// back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub robotic_arms: ObjectConfig,
    pub chessboard: ObjectConfig,
    pub title: RevealConfig,
    pub page: PageConfig,
    pub camera: Camera,
}

/// An object table replaces that object's defaults as a whole: `asset` is
/// required and any channel left out is disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub asset: PathBuf,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub animation: DriverConfig,
}

fn default_scale() -> f32 {
    1.0
}

impl ObjectConfig {
    /// Full-scene arm assembly: rises into place, then follows the pointer.
    pub fn robotic_arms() -> Self {
        Self {
            asset: PathBuf::from("assets/robotic_arms.glb"),
            scale: 2.0,
            animation: DriverConfig {
                entrance: Some(EntranceConfig {
                    from: Pose::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, -0.6, 0.0)),
                    duration: 1.2,
                    ..EntranceConfig::default()
                }),
                sway: None,
                tilt: Some(TiltConfig::default()),
                bob: None,
            },
        }
    }

    /// Board: drops in when scrolled into view, sways and floats.
    pub fn chessboard() -> Self {
        Self {
            asset: PathBuf::from("assets/chessboard.glb"),
            scale: 1.5,
            animation: DriverConfig {
                entrance: Some(EntranceConfig {
                    from: Pose::new(Vec3::new(0.0, -2.0, 0.0), Vec3::ZERO),
                    duration: 1.0,
                    ..EntranceConfig::default()
                }),
                sway: Some(SwayConfig::default()),
                tilt: None,
                bob: Some(Oscillation::new(2.0, 0.05)),
            },
        }
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            robotic_arms: ObjectConfig::robotic_arms(),
            chessboard: ObjectConfig::chessboard(),
            title: RevealConfig::default(),
            page: PageConfig::default(),
            camera: Camera::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Uses `explicit` if given, else `showcase.toml` when it exists, else
    /// the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::load(default_path);
        }

        log::info!("No {DEFAULT_CONFIG_PATH} found, using built-in configuration");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::channels::PointerAxes;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ShowcaseConfig = toml::from_str("").unwrap();
        assert_eq!(config, ShowcaseConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: ShowcaseConfig = toml::from_str(
            r#"
            [title]
            text = "CHESS"
            stagger_ms = 250

            [chessboard]
            asset = "models/board.glb"
            "#,
        )
        .unwrap();

        assert_eq!(config.title.text, "CHESS");
        assert_eq!(config.title.stagger_ms, 250);
        assert_eq!(config.title.base_delay_ms, 2500);
        assert_eq!(config.chessboard.asset, PathBuf::from("models/board.glb"));
        assert_eq!(config.chessboard.scale, 1.0);
        assert_eq!(config.chessboard.animation, DriverConfig::default());
        assert_eq!(config.robotic_arms, ObjectConfig::robotic_arms());
    }

    #[test]
    fn test_object_table_requires_asset() {
        let result: Result<ShowcaseConfig, _> = toml::from_str("[chessboard]\nscale = 3.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_animation_tables() {
        let config: ShowcaseConfig = toml::from_str(
            r#"
            [robotic_arms]
            asset = "arms.glb"

            [robotic_arms.animation.tilt]
            axes = "pitch"

            [robotic_arms.animation.sway.resting]
            period = 4.0
            amplitude = 0.2
            "#,
        )
        .unwrap();

        let animation = config.robotic_arms.animation;
        assert!(animation.entrance.is_none());
        assert_eq!(animation.tilt.unwrap().axes, PointerAxes::Pitch);
        assert_eq!(animation.tilt.unwrap().scale, 0.2);
        let sway = animation.sway.unwrap();
        assert_eq!(sway.resting, Oscillation::new(4.0, 0.2));
        assert_eq!(sway.hovering, SwayConfig::default().hovering);
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let config: ShowcaseConfig = toml::from_str(include_str!("../showcase.toml")).unwrap();
        assert_eq!(config, ShowcaseConfig::default());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = ShowcaseConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ShowcaseConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(ShowcaseConfig::resolve(Some(Path::new("missing/showcase.toml"))).is_err());
    }
}
