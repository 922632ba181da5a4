use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Pt2D;

/// Everything that can go wrong while turning a path into a ring. All of these are deterministic
/// for a given input; callers should skip or flag the feature, not retry.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeomError {
    #[error("need at least {needed} points, but got {got}")]
    EmptyInput { needed: usize, got: usize },

    /// Segment `idx` has (nearly) zero length, so its tangent is undefined.
    #[error("segment {idx} starting at {pt} has zero length")]
    DegenerateGeometry { idx: usize, pt: Pt2D },

    /// The miter between two segments can't be solved, because their offset rays are parallel.
    #[error("can't join segments at vertex {idx} ({pt}); the offset rays are parallel")]
    SingularJoin { idx: usize, pt: Pt2D },

    #[error("width must be positive and finite, but got {0}")]
    BadWidth(f64),

    #[error("path is already closed; use it directly as a ring instead of dilating it")]
    AlreadyClosed,

    #[error("ring isn't closed: first point {first}, last point {last}")]
    NotClosed { first: Pt2D, last: Pt2D },
}
