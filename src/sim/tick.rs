//! Fixed timestep simulation tick
//!
//! One call advances the ball by one step of its velocity. Check order is
//! significant: bricks first (on the current position), then the win check,
//! then translation and the wall/paddle tests on the projected position. Top
//! wall, paddle zone and bottom wall are mutually exclusive within a tick.

use super::collision::{
    Wall, circle_intersects_rect, past_bottom_wall, past_top_wall, side_wall_hit,
};
use super::state::{BrickStatus, GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Desired paddle center in field units (from pointer/touch position)
    pub paddle_center: Option<f32>,
}

/// Whether the driver should schedule another tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Halted,
}

/// Advance the game state by one tick
///
/// Returns [`TickStatus::Halted`] once the run is won or lost; ticking a
/// finished run leaves it untouched.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickStatus {
    if state.phase.is_terminal() {
        return TickStatus::Halted;
    }

    state.events.clear();
    state.time_ticks += 1;

    if let Some(center) = input.paddle_center {
        state.set_paddle_center(center);
    }

    if break_bricks(state) {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("All bricks cleared at tick {} (score {})", state.time_ticks, state.score);
        return TickStatus::Halted;
    }

    state.ball.pos += state.ball.vel;
    let radius = state.ball.radius;
    let projected = state.ball.projected();

    if let Some(wall) = side_wall_hit(projected, radius, state.field.width) {
        state.ball.vel.x = -state.ball.vel.x;
        state.events.push(GameEvent::WallBounce { wall });
    }

    if past_top_wall(projected, radius) {
        state.ball.vel.y = -state.ball.vel.y;
        state.events.push(GameEvent::WallBounce { wall: Wall::Top });
    } else if in_paddle_zone(state) {
        bounce_off_paddle(state);
    } else if past_bottom_wall(projected, radius, state.field.height) {
        return lose_life(state);
    }

    TickStatus::Continue
}

/// Break every active brick the ball overlaps, in column-major order
///
/// Each hit flips `dy` and scores, so overlapping two bricks at once scores
/// both and leaves `dy` unchanged. Returns true if the winning score was
/// reached by one of the hits.
fn break_bricks(state: &mut GameState) -> bool {
    let center = state.ball.pos;
    let radius = state.ball.radius;
    let points = u64::from(state.config.points_per_brick);
    let target = state.winning_score();
    let mut won = false;

    for brick in state.bricks.iter_mut() {
        if !brick.is_active() || !circle_intersects_rect(center, radius, &brick.rect) {
            continue;
        }
        brick.status = BrickStatus::Broken;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += points;
        state.events.push(GameEvent::BrickBroken {
            column: brick.column,
            row: brick.row,
        });
        log::trace!("Brick ({}, {}) broken, score {}", brick.column, brick.row, state.score);

        if state.score == target {
            won = true;
        }
    }

    won
}

/// Ball is about to reach the paddle's top surface while still above it
fn in_paddle_zone(state: &GameState) -> bool {
    let ball = &state.ball;
    let paddle = &state.paddle;
    let r = ball.radius;

    ball.projected().y > paddle.pos.y - r
        && ball.pos.y < paddle.pos.y
        && ball.pos.x > paddle.pos.x - r
        && ball.pos.x < paddle.pos.x + paddle.width + r
}

/// Reflect off the paddle top, steering by where the ball struck
///
/// Only a descending ball that already overlaps the top surface rebounds;
/// otherwise the zone just suppresses the bottom-wall test for this tick.
fn bounce_off_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    let paddle = &state.paddle;

    if ball.pos.y + ball.radius <= paddle.pos.y || ball.vel.y <= 0.0 {
        return;
    }

    let max_dx = state.config.ball.max_paddle_dx;
    let half_width = paddle.width / 2.0;
    // Hits past the paddle ends would otherwise exceed max_dx
    let offset = ((ball.pos.x - paddle.center_x()) / half_width).clamp(-1.0, 1.0);

    ball.vel.y = -ball.vel.y;
    ball.vel.x = offset * max_dx;
    state.events.push(GameEvent::PaddleHit { offset });
}

fn lose_life(state: &mut GameState) -> TickStatus {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::Lost);
        log::info!("Out of lives at tick {} (score {})", state.time_ticks, state.score);
        return TickStatus::Halted;
    }

    log::debug!("Life lost, {} remaining", state.lives);
    state.reset_ball_and_paddle();
    TickStatus::Continue
}
