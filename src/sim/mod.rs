//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Fixed brick scan order (column-major)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, Wall, circle_intersects_rect};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, Field, GameEvent, GamePhase, GameState, Paddle,
};
pub use tick::{TickInput, TickStatus, tick};
