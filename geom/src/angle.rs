use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle, stored in radians. Counter-clockwise is positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads)
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle(degs.to_radians())
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// Wraps the angle into (-pi, pi].
    pub fn normalized_radians(self) -> f64 {
        let mut rads = self.0 % (2.0 * PI);
        if rads <= -PI {
            rads += 2.0 * PI;
        } else if rads > PI {
            rads -= 2.0 * PI;
        }
        rads
    }

    pub fn normalized_degrees(self) -> f64 {
        self.normalized_radians().to_degrees()
    }

    /// The signed rotation needed to turn from `self` to `other`, in (-pi, pi]. Positive means
    /// turning left (counter-clockwise). An exact U-turn is +pi.
    pub fn rotation_towards(self, other: Angle) -> Angle {
        Angle(Angle(other.0 - self.0).normalized_radians())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.normalized_degrees())
    }
}
