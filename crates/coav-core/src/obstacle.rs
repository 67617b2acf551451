use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::spherical_to_cartesian;

/// A point in spherical coordinates relative to the sensor.
///
/// Sensor frame: x right, y forward, z up.
/// - `len`: distance from the sensor.
/// - `theta`: azimuth, `atan2(y, x)`; straight ahead is `π/2` and the angle
///   grows towards the left.
/// - `phi`: polar angle from +z; the optical horizon is `π/2`, smaller
///   values point upwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarVector {
    pub len: f64,
    pub theta: f64,
    pub phi: f64,
}

impl PolarVector {
    pub const fn new(len: f64, theta: f64, phi: f64) -> Self {
        Self { len, theta, phi }
    }
}

/// Angular extent of an obstacle.
///
/// `tlc` is the top-left corner and `brf` the bottom-right one, so
/// `tlc.theta >= brf.theta` and `tlc.phi <= brf.phi`. Both corners carry
/// the same range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub tlc: PolarVector,
    pub brf: PolarVector,
}

/// An obstacle region seen by a detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounding_box: BoundingBox,
    pub center: PolarVector,
}

impl Obstacle {
    /// Azimuth interval `(right, left)` covered by the bounding box.
    pub fn azimuth_range(&self) -> (f64, f64) {
        (self.bounding_box.brf.theta, self.bounding_box.tlc.theta)
    }

    /// Whether the bounding box intersects the azimuth interval `[lo, hi]`.
    pub fn overlaps_azimuth(&self, lo: f64, hi: f64) -> bool {
        let (right, left) = self.azimuth_range();
        right <= hi && left >= lo
    }

    /// Closest distance of the obstacle.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.center.len
    }

    /// Center as a sensor-frame point (x right, y forward, z up).
    pub fn center_point(&self) -> Vector3<f64> {
        spherical_to_cartesian(&self.center)
    }
}
