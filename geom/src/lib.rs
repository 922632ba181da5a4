//! Flat ground geometry built from surveyed map features: project GPS coordinates into a local
//! frame, split looping paths, and dilate centerlines into filled rings.

#[macro_use]
extern crate log;

mod angle;
mod bounds;
mod dilate;
mod error;
mod gps;
mod line;
mod path;
mod pt;
mod ring;
mod split;

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::dilate::JOIN_EPSILON;
pub use crate::error::GeomError;
pub use crate::gps::{Axes, LonLat, Projector, EARTH_RADIUS_METERS};
pub use crate::line::{ray_intersection, Direction, Line};
pub use crate::path::{Path, SimplePath};
pub use crate::pt::Pt2D;
pub use crate::ring::Ring;

/// Two points closer than this on both axes are treated as the same point. Used for loop
/// detection and for deciding if a path is already closed. Projected OSM nodes are stored with
/// 7 decimal places, so distinct nodes are at least ~1cm apart.
pub const EPSILON_DIST: f64 = 1e-4;

pub type Result<T> = std::result::Result<T, GeomError>;
