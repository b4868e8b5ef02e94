//! Collision tests for a circular ball against axis-aligned geometry
//!
//! All overlap tests use strict `<`/`>` comparisons, so a ball that exactly
//! touches an edge does not count as a hit. Wall tests take the *projected*
//! position (position + velocity) so velocity flips one tick before the ball
//! would visually cross the boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Which boundary of the field a projected ball position crosses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// True iff the circle's bounding box overlaps the rectangle on both axes
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.left()
        && center.x - radius < rect.right()
        && center.y + radius > rect.top()
        && center.y - radius < rect.bottom()
}

/// Side wall crossed by the projected position, if any
pub fn side_wall_hit(projected: Vec2, radius: f32, field_width: f32) -> Option<Wall> {
    if projected.x > field_width - radius {
        Some(Wall::Right)
    } else if projected.x < radius {
        Some(Wall::Left)
    } else {
        None
    }
}

/// Projected position is above the top wall
#[inline]
pub fn past_top_wall(projected: Vec2, radius: f32) -> bool {
    projected.y < radius
}

/// Projected position is below the bottom wall (a miss)
#[inline]
pub fn past_bottom_wall(projected: Vec2, radius: f32, field_height: f32) -> bool {
    projected.y > field_height - radius
}
