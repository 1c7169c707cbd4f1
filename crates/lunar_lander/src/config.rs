//! Game configuration
//!
//! Everything a session needs, loadable from TOML or RON through the engine's
//! [`Config`] trait. Missing fields fall back to the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use lander_engine::config::Config;
use lander_engine::foundation::math::Vec3;
use lander_engine::physics::{CollisionParams, FlightParams, LandingZone};
use lander_engine::spatial::OctreeConfig;

/// Top-level game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Session start and limits
    pub session: SessionConfig,

    /// Per-tick random perturbation
    pub turbulence: TurbulenceConfig,

    /// Where the terrain comes from
    pub terrain: TerrainConfig,

    /// Terrain index construction
    pub octree: OctreeConfig,

    /// Flight model
    pub flight: FlightParams,

    /// Contact response
    pub collision: CollisionParams,

    /// Landing pads
    pub landing: LandingZone,
}

/// Session start state and run limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Spawn and reset position
    pub start_position: Vec3,

    /// Spawn heading in degrees
    pub start_rotation: f32,

    /// Full tank, in time units of thrust
    pub fuel: f32,

    /// Fixed simulation rate for headless runs
    pub frame_rate: f32,

    /// Headless runs stop after this many ticks without an outcome
    pub max_ticks: u64,

    /// Seed for turbulence and procedural terrain
    pub seed: u64,
}

/// Turbulence ranges; each tick draws uniformly from `[-range, range]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbulenceConfig {
    /// Whether turbulence is applied at all
    pub enabled: bool,

    /// Range on X and Z
    pub horizontal: f32,

    /// Range on Y
    pub vertical: f32,
}

/// Terrain source: an OBJ file if `obj_path` is set, else a generated heightfield
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Terrain mesh to load
    pub obj_path: Option<PathBuf>,

    /// Generated heightfield
    pub heightfield: HeightfieldConfig,
}

/// Procedural heightfield parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightfieldConfig {
    /// Side length of the square terrain, centered on the origin
    pub size: f32,

    /// Grid cells per side
    pub cells: u32,

    /// Peak height of the rolling terrain
    pub amplitude: f32,

    /// Radius of the flattened area around each pad
    pub pad_clearing: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(37.0, 30.0, 57.0),
            start_rotation: 0.0,
            fuel: 120.0,
            frame_rate: 60.0,
            max_ticks: 60 * 60 * 5,
            seed: 0x5EED,
        }
    }
}

impl Default for TurbulenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            horizontal: 0.13,
            vertical: 0.01,
        }
    }
}

impl Default for HeightfieldConfig {
    fn default() -> Self {
        Self {
            size: 240.0,
            cells: 60,
            amplitude: 4.0,
            pad_clearing: 6.0,
        }
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), String> {
        let session = &self.session;
        if !session.start_position.iter().all(|c| c.is_finite()) {
            return Err("session.start_position must be finite".to_string());
        }
        if !(session.fuel.is_finite() && session.fuel >= 0.0) {
            return Err(format!("session.fuel must be non-negative, got {}", session.fuel));
        }
        if !(session.frame_rate.is_finite() && session.frame_rate > 0.0) {
            return Err(format!("session.frame_rate must be positive, got {}", session.frame_rate));
        }

        let turbulence = &self.turbulence;
        if !(turbulence.horizontal >= 0.0 && turbulence.vertical >= 0.0)
            || !turbulence.horizontal.is_finite()
            || !turbulence.vertical.is_finite()
        {
            return Err("turbulence ranges must be finite and non-negative".to_string());
        }

        let field = &self.terrain.heightfield;
        if field.cells == 0 || !(field.size.is_finite() && field.size > 0.0) {
            return Err("terrain.heightfield needs a positive size and at least one cell".to_string());
        }
        if !field.amplitude.is_finite() || !field.pad_clearing.is_finite() {
            return Err("terrain.heightfield values must be finite".to_string());
        }

        self.octree.validate()?;
        self.flight.validate()?;
        self.collision.validate()?;
        self.landing.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lander_engine::config::{ConfigError, ConfigFormat};

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.start_position, Vec3::new(37.0, 30.0, 57.0));
        assert_eq!(config.session.fuel, 120.0);
        assert_eq!(config.landing.pads.len(), 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let source = "\
[session]
fuel = 30.0
frame_rate = 30.0

[turbulence]
enabled = false

[collision]
crash_speed = 2.5
";
        let config = GameConfig::from_str_as(source, ConfigFormat::Toml).unwrap();
        assert_eq!(config.session.fuel, 30.0);
        assert_eq!(config.session.start_position, Vec3::new(37.0, 30.0, 57.0));
        assert!(!config.turbulence.enabled);
        assert_eq!(config.collision.crash_speed, 2.5);
        assert_eq!(config.collision.restitution, 0.5);
        assert_eq!(config.flight, FlightParams::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = GameConfig::default();
        config.terrain.obj_path = Some(PathBuf::from("assets/moon-houdini.obj"));
        config.session.seed = 7;
        let text = config.to_string_as(ConfigFormat::Ron).unwrap();
        let parsed = GameConfig::from_str_as(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let source = "[session]\nframe_rate = 0.0\n";
        let result = GameConfig::from_str_as(source, ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let source = "[flight]\ndamping = 2.0\n";
        let result = GameConfig::from_str_as(source, ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_collision_box_rejected() {
        let source = "\
[flight.local_bounds]
min = [1.0, 1.5, 1.0]
max = [-1.0, 0.0, -1.0]
";
        let result = GameConfig::from_str_as(source, ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let source = "\
[flight.local_bounds]
min = [-2.0, 0.0, -2.0]
max = [2.0, 1.0, 2.0]
";
        let config = GameConfig::from_str_as(source, ConfigFormat::Toml).unwrap();
        assert_eq!(config.flight.local_bounds.max, Vec3::new(2.0, 1.0, 2.0));
    }
}
