use serde::{Deserialize, Serialize};

use crate::histogram::{slice_count, sweep_rows};
use crate::ParamsError;

/// Rows scanned above and below the image midline unless configured otherwise.
pub const DEFAULT_VERTICAL_SWEEP_PIXELS: usize = 10;

/// Configuration of the polar-histogram detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarHistParams {
    /// Requested azimuthal width of one histogram slice (radians).
    ///
    /// The realized width is `hfov / ceil(hfov / angle_step)`, so it may be
    /// slightly smaller when the field of view is not a multiple of it.
    pub angle_step: f64,
    /// Proximity of interest, in the frame's physical units. Slices whose
    /// closest return is farther are ignored, and only samples closer than
    /// this count towards the density.
    pub threshold: f64,
    /// Minimal fraction of near samples in a slice for it to be reported.
    pub density: f64,
    /// Rows scanned on each side of the image midline (clamped to half the
    /// image height).
    pub vertical_sweep_pixels: usize,
}

impl Default for PolarHistParams {
    fn default() -> Self {
        Self {
            angle_step: 5f64.to_radians(),
            threshold: 2.0,
            density: 0.3,
            vertical_sweep_pixels: DEFAULT_VERTICAL_SWEEP_PIXELS,
        }
    }
}

impl PolarHistParams {
    pub fn new(angle_step: f64, threshold: f64, density: f64) -> Self {
        Self {
            angle_step,
            threshold,
            density,
            ..Self::default()
        }
    }

    /// Same as [`new`](Self::new) with the slice width given in degrees.
    pub fn with_angle_step_deg(angle_step_deg: f64, threshold: f64, density: f64) -> Self {
        Self::new(angle_step_deg.to_radians(), threshold, density)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.angle_step.is_finite() && self.angle_step > 0.0) {
            return Err(ParamsError::InvalidAngleStep(self.angle_step));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ParamsError::InvalidThreshold(self.threshold));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ParamsError::InvalidDensity(self.density));
        }
        Ok(())
    }

    /// Number of histogram slices for a given horizontal field of view.
    pub fn slice_count(&self, hfov: f64) -> usize {
        slice_count(hfov, self.angle_step)
    }

    /// Number of pixels the density ratio of one slice is normalized by.
    ///
    /// Zero means the configuration cannot produce obstacles for a frame of
    /// this size: either there are more slices than columns or the image is
    /// too short to have a sweep band.
    pub fn slice_pixel_count(&self, width: usize, height: usize, hfov: f64) -> usize {
        let slices = self.slice_count(hfov);
        if slices == 0 {
            return 0;
        }
        sweep_rows(height, self.vertical_sweep_pixels).len() * (width / slices)
    }
}

/// Configuration of the binary "obstacle straight ahead" detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleDetectorParams {
    /// Distance below which a sample counts as an obstacle.
    pub threshold: f64,
    /// Width of the central column window, as a fraction of the image width.
    pub front_window: f64,
    /// Near samples needed inside the window to raise the flag.
    pub min_hits: usize,
    /// Rows scanned on each side of the image midline.
    pub vertical_sweep_pixels: usize,
}

impl Default for SimpleDetectorParams {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            front_window: 0.2,
            min_hits: 1,
            vertical_sweep_pixels: DEFAULT_VERTICAL_SWEEP_PIXELS,
        }
    }
}

impl SimpleDetectorParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ParamsError::InvalidThreshold(self.threshold));
        }
        if !(self.front_window > 0.0 && self.front_window <= 1.0) {
            return Err(ParamsError::InvalidFrontWindow(self.front_window));
        }
        if self.min_hits == 0 {
            return Err(ParamsError::ZeroMinHits);
        }
        Ok(())
    }
}
