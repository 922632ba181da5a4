use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Direction, EPSILON_DIST};

/// A point in the local ground frame, in meters from the origin. The ground is flat, so there's
/// no real z component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub const fn new(x: f64, y: f64) -> Pt2D {
        Pt2D { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Always 0; ground features have no elevation.
    pub fn z(self) -> f64 {
        0.0
    }

    /// (x, y, z), the way downstream scene formats want points.
    pub fn to_xyz(self) -> [f64; 3] {
        [self.x, self.y, self.z()]
    }

    /// Component-wise comparison with `EPSILON_DIST` tolerance.
    pub fn approx_eq(self, other: Pt2D) -> bool {
        (self.x - other.x).abs() < EPSILON_DIST && (self.y - other.y).abs() < EPSILON_DIST
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    /// Moves `dist` meters along `dir`. Negative distances go backwards.
    pub fn project_away(self, dist: f64, dir: Direction) -> Pt2D {
        self.offset(dir.x() * dist, dir.y() * dist)
    }

    /// The arithmetic mean of some points, or None if there are none.
    pub fn center(pts: &[Pt2D]) -> Option<Pt2D> {
        if pts.is_empty() {
            return None;
        }
        let mut x = 0.0;
        let mut y = 0.0;
        for pt in pts {
            x += pt.x;
            y += pt.y;
        }
        let len = pts.len() as f64;
        Some(Pt2D::new(x / len, y / len))
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

impl From<Pt2D> for geo::Coordinate<f64> {
    fn from(pt: Pt2D) -> Self {
        geo::Coordinate { x: pt.x, y: pt.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_uses_epsilon() {
        let pt = Pt2D::new(10.0, -3.0);
        assert!(pt.approx_eq(pt.offset(EPSILON_DIST / 2.0, -EPSILON_DIST / 2.0)));
        assert!(!pt.approx_eq(pt.offset(EPSILON_DIST * 2.0, 0.0)));
        assert!(!pt.approx_eq(pt.offset(0.0, EPSILON_DIST * 2.0)));
        // The tolerance is 0.1mm
        assert_eq!(EPSILON_DIST, 1e-4);
    }

    #[test]
    fn center() {
        assert_eq!(Pt2D::center(&[]), None);
        assert_eq!(
            Pt2D::center(&[
                Pt2D::new(0.0, 0.0),
                Pt2D::new(4.0, 0.0),
                Pt2D::new(4.0, 2.0),
                Pt2D::new(0.0, 2.0)
            ]),
            Some(Pt2D::new(2.0, 1.0))
        );
    }
}
