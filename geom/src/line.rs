use serde::{Deserialize, Serialize};

use crate::{Angle, Pt2D};

/// A unit vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    x: f64,
    y: f64,
}

impl Direction {
    /// None if the vector is (nearly) zero.
    pub fn new(dx: f64, dy: f64) -> Option<Direction> {
        let len = dx.hypot(dy);
        if !len.is_finite() || len <= f64::EPSILON {
            return None;
        }
        Some(Direction {
            x: dx / len,
            y: dy / len,
        })
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn dot(self, other: Direction) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(self, other: Direction) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotated 90 degrees counter-clockwise, so it points to the left of travel.
    pub fn left_perpendicular(self) -> Direction {
        Direction {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn angle(self) -> Angle {
        Angle::new_rads(self.y.atan2(self.x))
    }
}

// Segment, technically
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line(pt1, pt2)
    }

    /// The unit tangent from pt1 to pt2. None for zero-length lines.
    pub fn direction(&self) -> Option<Direction> {
        Direction::new(self.1.x() - self.0.x(), self.1.y() - self.0.y())
    }
}

/// Intersects the ray `pt1 + dir1 * t` with `pt2 + dir2 * q` by solving the 2x2 system
/// `dir1 * t - dir2 * q = pt2 - pt1`. Returns None when the rays are parallel, because there's
/// no unique answer.
pub fn ray_intersection(pt1: Pt2D, dir1: Direction, pt2: Pt2D, dir2: Direction) -> Option<Pt2D> {
    // Determinant of [dir1, -dir2]
    let det = dir2.cross(dir1);
    if det.abs() < SINGULAR_EPSILON {
        return None;
    }
    let dx = pt2.x() - pt1.x();
    let dy = pt2.y() - pt1.y();
    // Cramer's rule for q
    let q = (dir1.x() * dy - dir1.y() * dx) / det;
    let hit = pt2.project_away(q, dir2);
    if hit.x().is_finite() && hit.y().is_finite() {
        Some(hit)
    } else {
        None
    }
}

const SINGULAR_EPSILON: f64 = 1e-9;
