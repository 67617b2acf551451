//! Conversions between sensor-frame Cartesian points and [`PolarVector`].

use nalgebra::Vector3;

use crate::PolarVector;

/// Convert a sensor-frame point (x right, y forward, z up) to spherical
/// coordinates. The origin maps to `len = 0` on the horizon.
pub fn cartesian_to_spherical(p: Vector3<f64>) -> PolarVector {
    let len = p.norm();
    if len == 0.0 {
        return PolarVector::new(0.0, 0.0, std::f64::consts::FRAC_PI_2);
    }
    PolarVector {
        len,
        theta: p.y.atan2(p.x),
        phi: (p.z / len).clamp(-1.0, 1.0).acos(),
    }
}

/// Inverse of [`cartesian_to_spherical`].
pub fn spherical_to_cartesian(v: &PolarVector) -> Vector3<f64> {
    let (sin_phi, cos_phi) = v.phi.sin_cos();
    let (sin_theta, cos_theta) = v.theta.sin_cos();
    Vector3::new(
        v.len * sin_phi * cos_theta,
        v.len * sin_phi * sin_theta,
        v.len * cos_phi,
    )
}
