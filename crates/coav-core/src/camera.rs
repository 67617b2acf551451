use serde::{Deserialize, Serialize};

use crate::{DepthFrame, FrameError};

/// Static description of a depth camera.
///
/// The tangent of the horizontal field of view is kept next to the angle
/// and recomputed only when [`set_hfov`](Self::set_hfov) changes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "DepthCameraConfig", into = "DepthCameraConfig")]
pub struct DepthCamera {
    width: usize,
    height: usize,
    scale: f64,
    hfov: f64,
    vfov: f64,
    hfov_tan: f64,
}

/// Serialized form of [`DepthCamera`]; the cached tangent is derived.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct DepthCameraConfig {
    width: usize,
    height: usize,
    scale: f64,
    hfov: f64,
    vfov: f64,
}

impl From<DepthCameraConfig> for DepthCamera {
    fn from(c: DepthCameraConfig) -> Self {
        DepthCamera::new(c.width, c.height, c.scale, c.hfov, c.vfov)
    }
}

impl From<DepthCamera> for DepthCameraConfig {
    fn from(c: DepthCamera) -> Self {
        Self {
            width: c.width,
            height: c.height,
            scale: c.scale,
            hfov: c.hfov,
            vfov: c.vfov,
        }
    }
}

impl DepthCamera {
    pub fn new(width: usize, height: usize, scale: f64, hfov: f64, vfov: f64) -> Self {
        Self {
            width,
            height,
            scale,
            hfov,
            vfov,
            hfov_tan: hfov.tan(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn hfov(&self) -> f64 {
        self.hfov
    }

    #[inline]
    pub fn vfov(&self) -> f64 {
        self.vfov
    }

    /// `tan(hfov)`, cached.
    #[inline]
    pub fn fov_tan(&self) -> f64 {
        self.hfov_tan
    }

    /// Change the horizontal field of view, refreshing the cached tangent
    /// only when the angle actually differs.
    pub fn set_hfov(&mut self, hfov: f64) {
        if hfov != self.hfov {
            self.hfov = hfov;
            self.hfov_tan = hfov.tan();
        }
    }

    pub fn set_vfov(&mut self, vfov: f64) {
        self.vfov = vfov;
    }

    /// Wrap a raw sample buffer captured by this camera into a frame.
    pub fn frame(&self, depth_buffer: Vec<u16>) -> Result<DepthFrame, FrameError> {
        DepthFrame::new(
            depth_buffer,
            self.width,
            self.height,
            self.hfov,
            self.vfov,
            self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_3, FRAC_PI_4};

    #[test]
    fn fov_tan_follows_hfov() {
        let mut cam = DepthCamera::new(4, 2, 0.001, FRAC_PI_4, FRAC_PI_3);
        assert_relative_eq!(cam.fov_tan(), 1.0, epsilon = 1e-12);

        cam.set_hfov(FRAC_PI_3);
        assert_relative_eq!(cam.fov_tan(), 3.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(cam.hfov(), FRAC_PI_3);
    }

    #[test]
    fn frame_carries_camera_properties() {
        let cam = DepthCamera::new(4, 2, 0.001, FRAC_PI_4, FRAC_PI_3);
        let frame = cam.frame(vec![1; 8]).expect("frame");
        assert_eq!((frame.width, frame.height), (4, 2));
        assert_eq!(frame.scale, 0.001);
        assert_eq!(frame.vfov, FRAC_PI_3);

        assert!(matches!(
            cam.frame(vec![1; 7]),
            Err(FrameError::BufferSizeMismatch { .. })
        ));
    }

    #[test]
    fn deserialized_camera_has_tangent() {
        let cam: DepthCamera = serde_json::from_str(
            r#"{"width": 640, "height": 480, "scale": 0.001, "hfov": 0.7853981633974483, "vfov": 1.0}"#,
        )
        .expect("parse camera");
        assert_relative_eq!(cam.fov_tan(), 1.0, epsilon = 1e-12);
    }
}
