//! Read-only views of the game for presentation layers
//!
//! [`FrameView`] borrows the live entities for in-process renderers;
//! [`Snapshot`] is an owned copy that serializes to JSON for front ends
//! living outside Rust.

use serde::{Deserialize, Serialize};

use crate::sim::{Ball, Brick, BrickGrid, Field, GameEvent, GamePhase, GameState, Paddle};

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub score: u64,
    pub lives: u32,
    pub phase: GamePhase,
}

impl SessionStatus {
    pub fn of(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            phase: state.phase,
        }
    }
}

/// Borrowed view of everything a renderer draws
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub field: &'a Field,
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub bricks: &'a BrickGrid,
    pub status: SessionStatus,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            field: &state.field,
            ball: &state.ball,
            paddle: &state.paddle,
            bricks: &state.bricks,
            status: SessionStatus::of(state),
        }
    }

    /// Bricks still standing, in scan order
    pub fn active_bricks(&self) -> impl Iterator<Item = &'a Brick> + 'a {
        let bricks: &'a BrickGrid = self.bricks;
        bricks.iter().filter(|b| b.is_active())
    }
}

/// Owned, serializable copy of a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub field: Field,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Only bricks still standing
    pub bricks: Vec<Brick>,
    pub status: SessionStatus,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn of(state: &GameState) -> Self {
        let view = FrameView::of(state);
        Self {
            tick: state.time_ticks,
            field: *view.field,
            ball: view.ball.clone(),
            paddle: view.paddle.clone(),
            bricks: view.active_bricks().cloned().collect(),
            status: view.status,
            events: state.events.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
