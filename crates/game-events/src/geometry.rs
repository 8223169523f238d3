//! Map geometry primitives.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D map coordinate in game units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn dist(self, other: Point2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2 {
    type Output = Point2;

    fn mul(self, factor: f32) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }
}

/// Playable map bounds.
///
/// Positions are valid in the half-open range `[0, width) x [0, height)`.
/// Units can report positions outside this range when they become
/// untracked, so consumers must check before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapBounds {
    pub width: f32,
    pub height: f32,
}

impl MapBounds {
    /// Creates new map bounds.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Checks whether a position lies inside the playable area.
    pub fn contains(self, pos: Point2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < self.width && pos.y < self.height
    }
}
