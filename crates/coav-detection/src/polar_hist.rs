use coav_core::{DepthFrame, Detector, Obstacle};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{build_histogram, extract_obstacles, ParamsError, PolarHistParams};

/// Depth-image obstacle detector based on a polar histogram.
///
/// Each call sweeps a band of rows around the image midline, keeps the
/// closest range per azimuthal slice and reports the slices that are both
/// closer than `threshold` and dense enough in near samples.
#[derive(Clone, Debug)]
pub struct DepthImagePolarHistDetector {
    params: PolarHistParams,
    obstacles: Vec<Obstacle>,
}

impl DepthImagePolarHistDetector {
    pub fn new(params: PolarHistParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            obstacles: Vec::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &PolarHistParams {
        &self.params
    }

    /// Result of the last [`detect`](Detector::detect) call.
    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl Detector for DepthImagePolarHistDetector {
    type Input = DepthFrame;
    type Output = Obstacle;

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    fn detect(&mut self, frame: &DepthFrame) -> &[Obstacle] {
        self.obstacles.clear();

        let Some(hist) = build_histogram(frame, &self.params) else {
            return &self.obstacles;
        };
        extract_obstacles(&hist, frame.vfov, &self.params, &mut self.obstacles);

        debug!(
            "{} slices of {:.4} rad, {} obstacles",
            hist.len(),
            hist.fixed_step,
            self.obstacles.len()
        );
        &self.obstacles
    }
}
