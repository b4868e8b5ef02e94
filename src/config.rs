//! Game tuning
//!
//! Defaults reproduce the classic layout: a 7x5 brick wall, a quarter-width
//! paddle and a ball launched at 3 px/tick on both axes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest brick wall a config may ask for
pub const MAX_BRICKS: u64 = 10_000;

/// Paddle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    /// Paddle height in field units
    pub height: f32,
    /// Paddle width as a fraction of field width
    pub width_ratio: f32,
    /// Gap between paddle bottom and field bottom
    pub bottom_offset: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            height: 15.0,
            width_ratio: 0.25,
            bottom_offset: 10.0,
        }
    }
}

/// Ball tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Gap between ball bottom and paddle top when served
    pub serve_gap: f32,
    /// Horizontal launch speed (sign is random per serve)
    pub launch_dx: f32,
    /// Upward launch speed
    pub launch_dy: f32,
    /// Horizontal speed imparted by a paddle edge hit
    pub max_paddle_dx: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            serve_gap: 5.0,
            launch_dx: 3.0,
            launch_dy: 3.0,
            max_paddle_dx: 3.0,
        }
    }
}

/// Brick wall layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: u32,
    pub columns: u32,
    pub height: f32,
    /// Space between neighbouring bricks
    pub padding: f32,
    /// Space above the first row (room for the HUD)
    pub offset_top: f32,
    /// Space left of the first column, mirrored on the right
    pub offset_left: f32,
    /// Row colors, cycled when there are more rows than colors
    pub palette: Vec<String>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 7,
            height: 20.0,
            padding: 5.0,
            offset_top: 40.0,
            offset_left: 10.0,
            palette: ["#DD0000", "#DD7700", "#DDDD00", "#00DD00", "#0000DD"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl BrickConfig {
    /// Width of a single brick when tiling a field of the given width
    pub fn brick_width(&self, field_width: f32) -> f32 {
        let columns = self.columns as f32;
        (field_width - self.offset_left * 2.0 - self.padding * (columns - 1.0)) / columns
    }

    /// Total number of bricks in the wall
    pub fn count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }

    /// Reject walls with no bricks or more than [`MAX_BRICKS`]
    pub fn check_size(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.count() > MAX_BRICKS {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
                max: MAX_BRICKS,
            });
        }
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    /// Score awarded per broken brick
    pub points_per_brick: u32,
    /// Lives at the start of a run
    pub starting_lives: u32,
    /// Field height / width when sizing from a container width
    pub aspect_ratio: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            points_per_brick: 10,
            starting_lives: 3,
            aspect_ratio: 1.5,
        }
    }
}

impl GameConfig {
    /// Score reached when every brick has been broken
    pub fn winning_score(&self) -> u64 {
        self.bricks.count() * u64::from(self.points_per_brick)
    }

    /// Check every tuning value that would otherwise produce degenerate geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bricks.check_size()?;
        if self.starting_lives == 0 {
            return Err(ConfigError::Zero("starting_lives"));
        }
        if self.points_per_brick == 0 {
            return Err(ConfigError::Zero("points_per_brick"));
        }
        if !(self.paddle.width_ratio > 0.0 && self.paddle.width_ratio < 1.0) {
            return Err(ConfigError::PaddleRatio(self.paddle.width_ratio));
        }
        if self.bricks.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let positive = [
            ("paddle.height", self.paddle.height),
            ("ball.radius", self.ball.radius),
            ("ball.launch_dx", self.ball.launch_dx),
            ("ball.launch_dy", self.ball.launch_dy),
            ("ball.max_paddle_dx", self.ball.max_paddle_dx),
            ("bricks.height", self.bricks.height),
            ("aspect_ratio", self.aspect_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        let non_negative = [
            ("paddle.bottom_offset", self.paddle.bottom_offset),
            ("ball.serve_gap", self.ball.serve_gap),
            ("bricks.padding", self.bricks.padding),
            ("bricks.offset_top", self.bricks.offset_top),
            ("bricks.offset_left", self.bricks.offset_left),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.winning_score(), 350);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "starting_lives": 5, "bricks": { "rows": 2 } }"#)
            .unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.bricks.rows, 2);
        assert_eq!(config.bricks.columns, 7);
        assert_eq!(config.ball.radius, 8.0);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let result = GameConfig::from_json(r#"{ "bricks": { "columns": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::EmptyGrid { columns: 0, .. })));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let result = GameConfig::from_json(r#"{ "bricks": { "rows": 700000000, "columns": 7 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::GridTooLarge { rows: 700000000, columns: 7, .. })
        ));

        // Product overflows u32 but must still be reported, not panic
        let mut config = GameConfig::default();
        config.bricks.rows = u32::MAX;
        config.bricks.columns = u32::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::GridTooLarge { .. })));

        config.bricks.rows = 100;
        config.bricks.columns = 100;
        assert!(config.validate().is_ok());
        assert_eq!(config.winning_score(), 100_000);
    }

    #[test]
    fn test_rejects_full_width_paddle() {
        let mut config = GameConfig::default();
        config.paddle.width_ratio = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::PaddleRatio(_))));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let mut config = GameConfig::default();
        config.ball.radius = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { name: "ball.radius", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_lives() {
        let result = GameConfig::from_json(r#"{ "starting_lives": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Zero("starting_lives"))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_brick_width_tiles_field() {
        let bricks = BrickConfig::default();
        // (300 - 20 - 30) / 7
        assert!((bricks.brick_width(300.0) - 250.0 / 7.0).abs() < 1e-4);
    }
}
