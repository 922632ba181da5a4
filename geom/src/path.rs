use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Pt2D;

/// An ordered sequence of points. The order is the direction of travel. Unlike a `Ring` or a
/// `SimplePath`, there are no guarantees at all; it may be empty, revisit points, or have
/// duplicate consecutive points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pts: Vec<Pt2D>,
}

impl Path {
    pub fn new(pts: Vec<Pt2D>) -> Path {
        Path { pts }
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// True if there are at least 3 points and the last is the first one again.
    pub fn is_closed(&self) -> bool {
        is_closed(&self.pts)
    }
}

/// A path produced by `Path::split_loops`. It has no revisit that the loop detector would split
/// on, so consecutive segments can be offset independently. It may be closed, in which case it's
/// already a ring and shouldn't be dilated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimplePath {
    pts: Vec<Pt2D>,
}

impl SimplePath {
    // Only the segmenter can vouch for the points.
    pub(crate) fn new(pts: Vec<Pt2D>) -> SimplePath {
        SimplePath { pts }
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        is_closed(&self.pts)
    }
}

impl fmt::Display for SimplePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SimplePath::new(vec![")?;
        for (idx, pt) in self.pts.iter().enumerate() {
            write!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
            if idx > 0 {
                write!(
                    f,
                    "    // {}, {}",
                    pt.x() - self.pts[idx - 1].x(),
                    pt.y() - self.pts[idx - 1].y()
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "])")
    }
}

fn is_closed(pts: &[Pt2D]) -> bool {
    pts.len() >= 3 && pts[0].approx_eq(pts[pts.len() - 1])
}
