use std::fmt;

use geo::Area;
use serde::{Deserialize, Serialize};

use crate::{Bounds, GeomError, Pt2D, Result};

/// Like a path, but closed: the last point repeats the first (within `EPSILON_DIST`). The
/// boundary of a filled area. The winding order is whatever produced it; don't assume clockwise
/// or counter-clockwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    // first equals last
    pts: Vec<Pt2D>,
}

impl Ring {
    /// Needs a triangle at least, plus the closing point.
    pub fn new(pts: Vec<Pt2D>) -> Result<Ring> {
        if pts.len() < 4 {
            return Err(GeomError::EmptyInput {
                needed: 4,
                got: pts.len(),
            });
        }
        let first = pts[0];
        let last = pts[pts.len() - 1];
        if !first.approx_eq(last) {
            return Err(GeomError::NotClosed { first, last });
        }
        Ok(Ring { pts })
    }

    /// Outlines from map data usually repeat the first point at the end, but not always. Close
    /// the outline if needed.
    pub fn closing(mut pts: Vec<Pt2D>) -> Result<Ring> {
        if let (Some(first), Some(last)) = (pts.first().copied(), pts.last().copied()) {
            if pts.len() == 1 || !first.approx_eq(last) {
                pts.push(first);
            }
        }
        Ring::new(pts)
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    /// Includes the closing point.
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// The enclosed area in square meters, regardless of winding.
    pub fn area(&self) -> f64 {
        geo::Polygon::new(self.clone().into(), Vec::new()).unsigned_area()
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.pts)
    }

    /// Produces a GeoJSON polygon in local coordinates.
    pub fn to_geojson(&self) -> geojson::Geometry {
        let pts = self.pts.iter().map(|pt| vec![pt.x(), pt.y()]).collect();
        geojson::Geometry::new(geojson::Value::Polygon(vec![pts]))
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}

impl From<Ring> for geo::LineString<f64> {
    fn from(ring: Ring) -> Self {
        let coords = ring
            .pts
            .into_iter()
            .map(geo::Coordinate::from)
            .collect::<Vec<_>>();
        geo::LineString(coords)
    }
}
