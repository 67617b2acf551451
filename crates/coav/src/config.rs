//! JSON configuration shared by the `coav` tools.
//!
//! ```json
//! {
//!   "camera": { "hfov_deg": 90.0, "vfov_deg": 60.0, "scale": 0.001 },
//!   "detector": { "angle_step": 0.0873, "threshold": 2.0, "density": 0.3 },
//!   "simple": { "threshold": 1.0, "front_window": 0.2 }
//! }
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use coav_core::{DepthFrame, FrameError};
use coav_detection::{
    DepthImagePolarHistDetector, DepthImageSimpleDetector, ParamsError, PolarHistParams,
    SimpleDetectorParams,
};
use serde::{Deserialize, Serialize};

/// Errors produced while reading a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Camera properties that a depth image file does not carry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal field of view (degrees).
    pub hfov_deg: f64,
    /// Vertical field of view (degrees).
    pub vfov_deg: f64,
    /// Raw sample units to physical distance.
    pub scale: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            hfov_deg: 90.0,
            vfov_deg: 60.0,
            scale: 0.001,
        }
    }
}

impl CameraConfig {
    #[inline]
    pub fn hfov(&self) -> f64 {
        self.hfov_deg.to_radians()
    }

    #[inline]
    pub fn vfov(&self) -> f64 {
        self.vfov_deg.to_radians()
    }

    /// Attach these camera properties to raw samples.
    pub fn frame(
        &self,
        width: usize,
        height: usize,
        depth_buffer: Vec<u16>,
    ) -> Result<DepthFrame, FrameError> {
        DepthFrame::new(
            depth_buffer,
            width,
            height,
            self.hfov(),
            self.vfov(),
            self.scale,
        )
    }
}

/// Top-level configuration of a detection run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    pub camera: CameraConfig,
    /// Polar-histogram detector; `angle_step` is in radians.
    pub detector: PolarHistParams,
    /// Binary front detector.
    pub simple: SimpleDetectorParams,
}

impl DetectConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn polar_hist_detector(&self) -> Result<DepthImagePolarHistDetector, ParamsError> {
        DepthImagePolarHistDetector::new(self.detector.clone())
    }

    pub fn simple_detector(&self) -> Result<DepthImageSimpleDetector, ParamsError> {
        DepthImageSimpleDetector::new(self.simple.clone())
    }
}
