use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Bounds, Pt2D};

/// Spherical earth. Good enough over the few kilometers a ground map covers.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// longitude is x, latitude is y
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Haversine distance
    pub fn gps_dist_meters(self, other: LonLat) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = lat2 - lat1;
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }

    /// The initial great-circle bearing towards `other`, clockwise from north, in radians.
    pub fn bearing_to(self, other: LonLat) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        y.atan2(x)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

/// How the local x/y axes line up with the compass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axes {
    /// x points east, y points north.
    EastNorth,
    /// x points north, y points west. This is what you get plugging the raw compass bearing into
    /// `x = d cos(θ), y = -d sin(θ)`.
    Bearing,
}

impl Default for Axes {
    fn default() -> Self {
        Axes::EastNorth
    }
}

impl std::str::FromStr for Axes {
    type Err = String;

    fn from_str(x: &str) -> Result<Axes, String> {
        match x {
            "east-north" => Ok(Axes::EastNorth),
            "bearing" => Ok(Axes::Bearing),
            _ => Err(format!("unknown axes {}; use east-north or bearing", x)),
        }
    }
}

/// Projects GPS coordinates onto a flat plane tangent to the earth at `origin`. Every point is
/// placed using its great-circle distance and initial bearing from the origin, so this distorts
/// badly over hundreds of kilometers. Cheap to copy and safe to share between threads.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projector {
    origin: LonLat,
    axes: Axes,
}

impl Projector {
    pub fn new(origin: LonLat, axes: Axes) -> Projector {
        Projector { origin, axes }
    }

    pub fn origin(&self) -> LonLat {
        self.origin
    }

    pub fn axes(&self) -> Axes {
        self.axes
    }

    pub fn project_pt(&self, gps: LonLat) -> Pt2D {
        let dist = self.origin.gps_dist_meters(gps);
        if dist == 0.0 {
            return Pt2D::new(0.0, 0.0);
        }
        let bearing = self.origin.bearing_to(gps);
        let theta = match self.axes {
            Axes::EastNorth => bearing - FRAC_PI_2,
            Axes::Bearing => bearing,
        };
        Pt2D::new(dist * theta.cos(), -dist * theta.sin())
    }

    /// An empty input just produces an empty output.
    pub fn project(&self, pts: &[LonLat]) -> Vec<Pt2D> {
        pts.iter().map(|pt| self.project_pt(*pt)).collect()
    }

    /// Projects the corners of a GPS bounding box and returns the local extent they span.
    pub fn local_bounds(&self, corner1: LonLat, corner2: LonLat) -> Bounds {
        let mut b = Bounds::new();
        for lon in [corner1.longitude, corner2.longitude] {
            for lat in [corner1.latitude, corner2.latitude] {
                b.update(self.project_pt(LonLat::new(lon, lat)));
            }
        }
        b
    }
}
