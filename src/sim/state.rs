//! Game state and entity types
//!
//! Everything the simulation step reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, Wall};
use crate::config::{BallConfig, BrickConfig, GameConfig, PaddleConfig};
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in flight, ticks are being applied
    Playing,
    /// Every brick broken
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    /// Won and Lost only leave via an explicit restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Something that happened during a tick, for sound/effects collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickBroken { column: u32, row: u32 },
    WallBounce { wall: Wall },
    /// Offset of the contact point from the paddle center, in [-1, 1]
    PaddleHit { offset: f32 },
    LifeLost { remaining: u32 },
    Won,
    Lost,
}

/// The rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidField { width, height });
        }
        Ok(Self { width, height })
    }

    /// Size a field from its container width with a fixed height/width ratio
    pub fn from_container_width(width: f32, aspect_ratio: f32) -> Result<Self, ConfigError> {
        Self::new(width, width * aspect_ratio)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A freshly served ball resting above the paddle, heading up
    pub fn serve(paddle: &Paddle, field: &Field, config: &BallConfig, rng: &mut Pcg32) -> Self {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            pos: Vec2::new(field.center_x(), paddle.pos.y - config.radius - config.serve_gap),
            vel: Vec2::new(config.launch_dx * sign, -config.launch_dy),
            radius: config.radius,
        }
    }

    /// Where the ball will be after one more tick
    #[inline]
    pub fn projected(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle sitting near the bottom of the field
    pub fn new(field: &Field, config: &PaddleConfig) -> Self {
        let width = field.width * config.width_ratio;
        Self {
            pos: Vec2::new(
                (field.width - width) / 2.0,
                field.height - config.height - config.bottom_offset,
            ),
            width,
            height: config.height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(self.width, self.height),
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Move the paddle so its center sits at `center_x`, kept inside the field
    ///
    /// A non-finite target leaves the paddle where it is.
    pub fn set_center(&mut self, center_x: f32, field_width: f32) {
        if !center_x.is_finite() {
            return;
        }
        self.pos.x = center_x - self.width / 2.0;
        self.clamp_to(field_width);
    }

    pub fn recenter(&mut self, field_width: f32) {
        self.pos.x = (field_width - self.width) / 2.0;
    }

    /// Recompute size and height for a new field, keeping x where possible
    pub fn resize(&mut self, field: &Field, config: &PaddleConfig) {
        self.width = field.width * config.width_ratio;
        self.height = config.height;
        self.pos.y = field.height - config.height - config.bottom_offset;
        self.clamp_to(field.width);
    }

    fn clamp_to(&mut self, field_width: f32) {
        self.pos.x = self.pos.x.clamp(0.0, field_width - self.width);
    }
}

/// Brick state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Broken,
}

/// A single brick in the wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub column: u32,
    pub row: u32,
    pub rect: Rect,
    pub status: BrickStatus,
    /// Row color (cosmetic)
    pub color: String,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Fixed columns x rows wall of bricks
///
/// Bricks are stored column-major (column outer, row inner). Collision scans
/// walk this order, so when the ball overlaps two bricks in one tick the one
/// in the lower column (then lower row) is processed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub columns: u32,
    pub rows: u32,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out a fresh, fully active wall tiling the field width
    pub fn new(field: &Field, config: &BrickConfig) -> Result<Self, ConfigError> {
        config.check_size()?;
        if config.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let width = config.brick_width(field.width);
        if width.is_nan() || width <= 0.0 {
            return Err(ConfigError::FieldTooNarrow {
                field_width: field.width,
                brick_width: width,
            });
        }

        let mut bricks = Vec::with_capacity(config.count() as usize);
        for column in 0..config.columns {
            for row in 0..config.rows {
                let x = config.offset_left + column as f32 * (width + config.padding);
                let y = config.offset_top + row as f32 * (config.height + config.padding);
                bricks.push(Brick {
                    column,
                    row,
                    rect: Rect::new(x, y, width, config.height),
                    status: BrickStatus::Active,
                    color: config.palette[row as usize % config.palette.len()].clone(),
                });
            }
        }

        Ok(Self {
            columns: config.columns,
            rows: config.rows,
            bricks,
        })
    }

    /// Bricks in scan order (column-major)
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn get(&self, column: u32, row: u32) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get((column * self.rows + row) as usize)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from; restarts reuse it
    pub seed: u64,
    rng: Pcg32,
    pub config: GameConfig,
    pub field: Field,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: u64,
    pub lives: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run: full lives, zero score, every brick active
    pub fn new(config: GameConfig, field: Field, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let bricks = BrickGrid::new(&field, &config.bricks)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&field, &config.paddle);
        let ball = Ball::serve(&paddle, &field, &config.ball, &mut rng);

        Ok(Self {
            seed,
            rng,
            lives: config.starting_lives,
            config,
            field,
            ball,
            paddle,
            bricks,
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// Re-center the paddle and serve a new ball; bricks and score persist
    pub fn reset_ball_and_paddle(&mut self) {
        self.paddle.recenter(self.field.width);
        self.ball = Ball::serve(&self.paddle, &self.field, &self.config.ball, &mut self.rng);
    }

    /// Apply a paddle-center target from the input collaborator
    ///
    /// Ignored once the run is over.
    pub fn set_paddle_center(&mut self, center_x: f32) {
        if self.phase == GamePhase::Playing {
            self.paddle.set_center(center_x, self.field.width);
        }
    }

    /// Adopt new field dimensions
    ///
    /// While playing, the paddle is refitted and the wall is re-laid; the ball,
    /// score and lives carry over. After the run ends only the field is stored.
    pub fn resize(&mut self, field: Field) -> Result<(), ConfigError> {
        // Build the wall first so a bad size leaves the state untouched
        let bricks = BrickGrid::new(&field, &self.config.bricks)?;
        if self.phase == GamePhase::Playing {
            self.paddle.resize(&field, &self.config.paddle);
            self.bricks = bricks;
        }
        self.field = field;
        Ok(())
    }

    /// Score at which every brick has been broken
    pub fn winning_score(&self) -> u64 {
        self.config.winning_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        Field::new(300.0, 450.0).unwrap()
    }

    #[test]
    fn test_field_rejects_degenerate_sizes() {
        assert!(Field::new(0.0, 450.0).is_err());
        assert!(Field::new(300.0, -1.0).is_err());
        assert!(Field::new(f32::NAN, 450.0).is_err());
        let f = Field::from_container_width(300.0, 1.5).unwrap();
        assert_eq!(f.height, 450.0);
    }

    #[test]
    fn test_paddle_starts_centered_near_bottom() {
        let paddle = Paddle::new(&field(), &PaddleConfig::default());
        assert_eq!(paddle.width, 75.0);
        assert_eq!(paddle.pos.x, 112.5);
        assert_eq!(paddle.pos.y, 425.0);
        assert_eq!(paddle.center_x(), 150.0);
    }

    #[test]
    fn test_paddle_clamps_to_field() {
        let mut paddle = Paddle::new(&field(), &PaddleConfig::default());
        paddle.set_center(-50.0, 300.0);
        assert_eq!(paddle.pos.x, 0.0);
        paddle.set_center(1000.0, 300.0);
        assert_eq!(paddle.pos.x, 225.0);
        paddle.set_center(100.0, 300.0);
        assert_eq!(paddle.pos.x, 62.5);
        paddle.set_center(f32::NAN, 300.0);
        assert_eq!(paddle.pos.x, 62.5);
        paddle.set_center(f32::INFINITY, 300.0);
        assert_eq!(paddle.pos.x, 62.5);
    }

    #[test]
    fn test_ball_serves_upward_above_paddle() {
        let f = field();
        let paddle = Paddle::new(&f, &PaddleConfig::default());
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let ball = Ball::serve(&paddle, &f, &BallConfig::default(), &mut rng);
            assert_eq!(ball.pos, Vec2::new(150.0, 412.0));
            assert_eq!(ball.vel.y, -3.0);
            assert_eq!(ball.vel.x.abs(), 3.0);
        }
    }

    #[test]
    fn test_grid_layout_column_major() {
        let grid = BrickGrid::new(&field(), &BrickConfig::default()).unwrap();
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.active_count(), 35);

        let order: Vec<(u32, u32)> = grid.iter().take(6).map(|b| (b.column, b.row)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 0)]);

        let brick = grid.get(2, 3).unwrap();
        assert_eq!((brick.column, brick.row), (2, 3));
        assert_eq!(brick.rect.top(), 40.0 + 3.0 * 25.0);
        assert_eq!(brick.color, "#00DD00");
        assert!(grid.get(7, 0).is_none());
    }

    #[test]
    fn test_grid_palette_cycles_by_row() {
        let config = BrickConfig {
            rows: 7,
            ..BrickConfig::default()
        };
        let grid = BrickGrid::new(&field(), &config).unwrap();
        assert_eq!(grid.get(0, 5).unwrap().color, "#DD0000");
        assert_eq!(grid.get(3, 6).unwrap().color, "#DD7700");
    }

    #[test]
    fn test_grid_rejects_oversized_wall() {
        let config = BrickConfig {
            rows: 200_000,
            columns: 200_000,
            ..BrickConfig::default()
        };
        assert!(matches!(
            BrickGrid::new(&field(), &config),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_grid_rejects_narrow_field() {
        let narrow = Field::new(40.0, 60.0).unwrap();
        let result = BrickGrid::new(&narrow, &BrickConfig::default());
        assert!(matches!(result, Err(ConfigError::FieldTooNarrow { .. })));
    }

    #[test]
    fn test_reset_keeps_bricks_and_score() {
        let mut state = GameState::new(GameConfig::default(), field(), 1).unwrap();
        state.score = 40;
        state.bricks.iter_mut().next().unwrap().status = BrickStatus::Broken;
        state.paddle.set_center(20.0, 300.0);
        state.ball.pos = Vec2::new(3.0, 3.0);

        state.reset_ball_and_paddle();

        assert_eq!(state.score, 40);
        assert_eq!(state.bricks.active_count(), 34);
        assert_eq!(state.paddle.pos.x, 112.5);
        assert_eq!(state.ball.pos, Vec2::new(150.0, 412.0));
    }

    #[test]
    fn test_resize_while_playing_rebuilds_wall() {
        let mut state = GameState::new(GameConfig::default(), field(), 1).unwrap();
        state.score = 20;
        state.lives = 2;
        state.bricks.iter_mut().next().unwrap().status = BrickStatus::Broken;
        state.paddle.set_center(290.0, 300.0);
        let ball = state.ball.clone();

        state.resize(Field::new(200.0, 300.0).unwrap()).unwrap();

        assert_eq!(state.paddle.width, 50.0);
        assert_eq!(state.paddle.pos.x, 150.0);
        assert_eq!(state.paddle.pos.y, 275.0);
        assert_eq!(state.bricks.active_count(), 35);
        assert_eq!(state.ball, ball);
        assert_eq!(state.score, 20);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_bad_resize_leaves_state_untouched() {
        let mut state = GameState::new(GameConfig::default(), field(), 1).unwrap();
        let before = state.paddle.clone();
        assert!(state.resize(Field::new(30.0, 45.0).unwrap()).is_err());
        assert_eq!(state.paddle, before);
        assert_eq!(state.field.width, 300.0);
    }

    #[test]
    fn test_resize_after_game_over_only_stores_field() {
        let mut state = GameState::new(GameConfig::default(), field(), 1).unwrap();
        state.phase = GamePhase::Lost;
        let paddle = state.paddle.clone();
        state.resize(Field::new(400.0, 600.0).unwrap()).unwrap();
        assert_eq!(state.paddle, paddle);
        assert_eq!(state.field.width, 400.0);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut state = GameState::new(GameConfig::default(), field(), 1).unwrap();
        state.phase = GamePhase::Won;
        state.set_paddle_center(0.0);
        assert_eq!(state.paddle.pos.x, 112.5);
    }
}
