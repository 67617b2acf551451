use std::ops::Range;

use coav_core::{DepthFrame, Detector};
use log::debug;

use crate::histogram::sweep_rows;
use crate::{ParamsError, SimpleDetectorParams};

/// Binary detector: is there anything close right in front of the camera?
///
/// The detection is always a one-element slice. It looks only at a central
/// window of columns inside the midline sweep band and raises the flag when
/// enough samples there are closer than the threshold.
#[derive(Clone, Debug)]
pub struct DepthImageSimpleDetector {
    params: SimpleDetectorParams,
    detection: [bool; 1],
}

impl DepthImageSimpleDetector {
    pub fn new(params: SimpleDetectorParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            detection: [false],
        })
    }

    #[inline]
    pub fn params(&self) -> &SimpleDetectorParams {
        &self.params
    }

    /// Flag computed by the last [`detect`](Detector::detect) call.
    #[inline]
    pub fn obstacle_ahead(&self) -> bool {
        self.detection[0]
    }

    fn front_columns(&self, width: usize) -> Range<usize> {
        let window = ((width as f64 * self.params.front_window).round() as usize).clamp(1, width);
        let start = (width - window) / 2;
        start..start + window
    }
}

impl Detector for DepthImageSimpleDetector {
    type Input = DepthFrame;
    type Output = bool;

    fn detect(&mut self, frame: &DepthFrame) -> &[bool] {
        self.detection[0] = false;
        if frame.is_empty() || frame.width == 0 {
            return &self.detection;
        }

        let columns = self.front_columns(frame.width);
        let view = frame.view();
        let mut hits = 0usize;
        'rows: for y in sweep_rows(frame.height, self.params.vertical_sweep_pixels) {
            let Some(row) = view.row(y).get(columns.clone()) else {
                continue;
            };
            for &raw in row {
                if frame.scaled(raw) < self.params.threshold {
                    hits += 1;
                    if hits >= self.params.min_hits {
                        break 'rows;
                    }
                }
            }
        }

        self.detection[0] = hits >= self.params.min_hits;
        debug!("front window {columns:?}: {hits} near samples");
        &self.detection
    }
}
