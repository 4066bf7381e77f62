use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::animation::AnimationParams;
use crate::color::ColorScheme;
use crate::curve::CurveParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Coordinate overlay drawn behind the curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    #[default]
    Cartesian,
    Polar,
}

impl CoordinateSystem {
    pub fn toggled(&self) -> Self {
        match self {
            CoordinateSystem::Cartesian => CoordinateSystem::Polar,
            CoordinateSystem::Polar => CoordinateSystem::Cartesian,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSystem::Cartesian => write!(f, "cartesian"),
            CoordinateSystem::Polar => write!(f, "polar"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub curve: CurveConfig,
    pub animation: AnimationConfig,
    pub view: ViewConfig,
}

/// Limaçon parameters: `r = a(k + cos t)` sampled at `steps + 1` points
/// over `turns` full traversals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub a: f64,
    pub k: f64,
    pub steps: u32,
    pub turns: u32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self { a: 20.0, k: 2.0, steps: 1000, turns: 1 }
    }
}

impl CurveConfig {
    pub fn params(&self) -> CurveParams {
        CurveParams {
            a: self.a,
            k: self.k,
            steps: self.steps,
            turns: self.turns.max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub speed: f64,
    pub loops: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { speed: 1.0, loops: 1 }
    }
}

impl AnimationConfig {
    pub fn params(&self) -> AnimationParams {
        AnimationParams {
            speed: self.speed,
            loops: self.loops.max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub coordinates: CoordinateSystem,
    pub color_scheme: ColorScheme,
    /// Manual zoom multiplier on top of the auto-fit scale (0.5 - 5.0).
    pub zoom: f64,
    /// Whether the curve is drawn on startup.
    pub show_curve: bool,
    pub target_fps: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            coordinates: CoordinateSystem::Cartesian,
            color_scheme: ColorScheme::Spectrum,
            zoom: 1.0,
            show_curve: true,
            target_fps: 60,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/limaviz/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("limaviz").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}\nUsing defaults.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = Self::generate_config_template();
        std::fs::write(&path, template)?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Limaviz Configuration
# This file is auto-generated. Edit as needed.

[curve]
# Radius scale of r = a(k + cos t)
a = 20.0
# Shape parameter: 1 = cardioid, < 1 = inner loop, > 1 = convex
k = 2.0
# Sample count (the curve is drawn through steps + 1 points)
steps = 1000
# Number of full 2*pi traversals
turns = 1

[animation]
# Time-dilation multiplier (> 0); one traversal takes 8 s / speed
speed = 1.0
# Full traversals before the animation completes
loops = 1

[view]
# Coordinate overlay: "cartesian" or "polar"
coordinates = "cartesian"
# Color scheme: "spectrum", "rainbow", "fire", "ocean", "monochrome"
color_scheme = "spectrum"
# Manual zoom multiplier on top of the auto-fit scale (0.5 - 5.0)
zoom = 1.0
# Draw the curve on startup
show_curve = true
# Render loop target frame rate
target_fps = 60
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        // Curve parameters
        if let Some(a) = args.a {
            self.curve.a = a;
        }
        if let Some(k) = args.k {
            self.curve.k = k;
        }
        if let Some(steps) = args.steps {
            self.curve.steps = steps;
        }
        if let Some(turns) = args.turns {
            self.curve.turns = turns;
        }

        // Animation parameters
        if let Some(speed) = args.speed {
            self.animation.speed = speed;
        }
        if let Some(loops) = args.loops {
            self.animation.loops = loops;
        }

        // View settings
        if args.polar {
            self.view.coordinates = CoordinateSystem::Polar;
        }
        if let Some(ref colors) = args.colors {
            self.view.color_scheme = colors.parse().unwrap_or(self.view.color_scheme);
        }
        if let Some(zoom) = args.zoom {
            self.view.zoom = zoom.clamp(crate::view::MIN_MANUAL_ZOOM, crate::view::MAX_MANUAL_ZOOM);
        }
        if let Some(fps) = args.fps {
            self.view.target_fps = fps.max(1);
        }
        if args.hide_curve {
            self.view.show_curve = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_parameters() {
        let config = Config::default();
        assert_eq!(config.curve.a, 20.0);
        assert_eq!(config.curve.k, 2.0);
        assert_eq!(config.curve.steps, 1000);
        assert_eq!(config.curve.turns, 1);
        assert_eq!(config.animation.speed, 1.0);
        assert_eq!(config.animation.loops, 1);
        assert_eq!(config.view.coordinates, CoordinateSystem::Cartesian);
    }

    #[test]
    fn template_round_trips_through_the_parser() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config.curve.steps, 1000);
        assert_eq!(config.view.target_fps, 60);
        assert_eq!(config.view.color_scheme, ColorScheme::Spectrum);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: Config = toml::from_str("[curve]\na = 5.0\nk = 0.5\n").unwrap();
        assert_eq!(config.curve.a, 5.0);
        assert_eq!(config.curve.steps, 1000);
        assert_eq!(config.animation.loops, 1);
    }

    #[test]
    fn turns_and_loops_are_floored_at_one() {
        let curve = CurveConfig { a: 1.0, k: 1.0, steps: 10, turns: 0 };
        assert_eq!(curve.params().turns, 1);
        let anim = AnimationConfig { speed: 1.0, loops: 0 };
        assert_eq!(anim.params().loops, 1);
    }
}
