//! Polar histogram of a depth frame.
//!
//! The horizontal field of view is cut into equal azimuthal slices. For each
//! slice we keep the closest range seen inside a band of rows around the
//! image midline, and how many of those samples were closer than the
//! proximity threshold.

use std::ops::Range;

use coav_core::DepthFrame;
use log::warn;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::PolarHistParams;

/// Per-slice minimum range and near-sample count for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarHistogram {
    /// Closest range per slice, left to right in image order.
    pub ranges: Vec<f64>,
    /// Samples closer than the threshold, per slice.
    pub density_count: Vec<u32>,
    /// Horizontal field of view the slices cover (radians).
    pub hfov: f64,
    /// Realized angular width of one slice, `hfov / len`.
    pub fixed_step: f64,
    /// Rows that were scanned.
    pub rows: Range<usize>,
    /// Image width in pixels.
    pub width: usize,
    /// Range a slice keeps when it saw no return at all.
    pub max_range: f64,
}

impl PolarHistogram {
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Nominal number of samples per slice: sweep rows times whole columns
    /// per slice. Zero for degenerate frame/slicing combinations.
    pub fn slice_pixel_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.rows.len() * (self.width / self.len())
    }

    /// Fraction of near samples in slice `i`.
    ///
    /// Slices that do not divide the width evenly can exceed `1.0` in their
    /// last columns; the ratio is not clamped.
    pub fn density_ratio(&self, i: usize) -> f64 {
        f64::from(self.density_count[i]) / self.slice_pixel_count() as f64
    }
}

/// `ceil(hfov / angle_step)`, or zero when that is not a usable count.
pub fn slice_count(hfov: f64, angle_step: f64) -> usize {
    let n = (hfov / angle_step).ceil();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        0
    }
}

/// Rows within `max_rows` of the midline, never leaving the image.
pub fn sweep_rows(height: usize, max_rows: usize) -> Range<usize> {
    let middle = height / 2;
    let half = max_rows.min(middle);
    (middle - half)..(middle + half)
}

/// Build the polar histogram of `frame`.
///
/// Returns `None` for a frame without samples, when the field of view and
/// angle step do not give at least one slice, or when there are more slices
/// than image columns (no slice could hold a whole pixel column).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(frame, params), fields(width = frame.width, height = frame.height))
)]
pub fn build_histogram(frame: &DepthFrame, params: &PolarHistParams) -> Option<PolarHistogram> {
    if frame.is_empty() {
        return None;
    }

    let slices = slice_count(frame.hfov, params.angle_step);
    if slices == 0 {
        return None;
    }
    if slices > frame.width {
        warn!(
            "{slices} slices over {} columns leave no pixels per slice; no obstacles reported",
            frame.width
        );
        return None;
    }

    let mut ranges = vec![frame.max_range(); slices];
    let mut density_count = vec![0u32; slices];
    let rows = sweep_rows(frame.height, params.vertical_sweep_pixels);
    let view = frame.view();
    let width = frame.width as f64;

    for y in rows.clone() {
        for (x, &raw) in view.row(y).iter().enumerate() {
            let slice = (((x as f64 / width) * slices as f64) as usize).min(slices - 1);
            let depth = frame.scaled(raw);

            if depth < params.threshold {
                density_count[slice] += 1;
            }
            if depth < ranges[slice] {
                ranges[slice] = depth;
            }
        }
    }

    Some(PolarHistogram {
        ranges,
        density_count,
        hfov: frame.hfov,
        fixed_step: frame.hfov / slices as f64,
        rows,
        width: frame.width,
        max_range: frame.max_range(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    fn frame(width: usize, height: usize, data: Vec<u16>) -> DepthFrame {
        DepthFrame::new(data, width, height, FRAC_PI_2, FRAC_PI_3, 0.001).expect("frame")
    }

    #[test]
    fn sweep_band_is_clamped_to_image() {
        assert_eq!(sweep_rows(20, 10), 0..20);
        assert_eq!(sweep_rows(100, 10), 40..60);
        assert_eq!(sweep_rows(5, 10), 0..4);
        assert_eq!(sweep_rows(1, 10), 0..0);
    }

    #[test]
    fn slice_count_rounds_up() {
        assert_eq!(slice_count(FRAC_PI_2, PI / 20.0), 10);
        assert_eq!(slice_count(FRAC_PI_2, 0.4), 4);
        assert_eq!(slice_count(0.0, 0.1), 0);
        assert_eq!(slice_count(FRAC_PI_2, 0.0), 0);
    }

    #[test]
    fn uneven_step_gives_equal_slices() {
        let f = frame(40, 4, vec![500; 160]);
        let params = PolarHistParams::new(0.4, 2.0, 0.5);
        let hist = build_histogram(&f, &params).expect("histogram");
        assert_eq!(hist.len(), 4);
        assert_relative_eq!(hist.fixed_step, FRAC_PI_2 / 4.0);
    }

    #[test]
    fn empty_frame_has_no_histogram() {
        let f = DepthFrame::empty(100, 20, FRAC_PI_2, FRAC_PI_3, 0.001);
        assert!(build_histogram(&f, &PolarHistParams::default()).is_none());
    }

    #[test]
    fn more_slices_than_columns_is_rejected_before_allocating() {
        let f = frame(100, 20, vec![500; 2000]);
        // ~1.6e15 slices; must not try to allocate them.
        let tiny = PolarHistParams::new(1e-15, 2.0, 0.5);
        assert!(tiny.validate().is_ok());
        assert!(build_histogram(&f, &tiny).is_none());

        let eleven = PolarHistParams::new(FRAC_PI_2 / 11.0 + 1e-9, 2.0, 0.5);
        assert_eq!(slice_count(FRAC_PI_2, eleven.angle_step), 11);
        assert!(build_histogram(&frame(10, 4, vec![500; 40]), &eleven).is_none());
        assert_eq!(
            build_histogram(&frame(11, 4, vec![500; 44]), &eleven).map(|h| h.len()),
            Some(11)
        );
    }

    #[test]
    fn zero_samples_read_as_max_range() {
        let f = frame(100, 20, vec![0; 2000]);
        let params = PolarHistParams::new(PI / 20.0, 2.0, 0.5);
        let hist = build_histogram(&f, &params).expect("histogram");
        assert_eq!(hist.len(), 10);
        for (range, count) in hist.ranges.iter().zip(&hist.density_count) {
            assert_eq!(*range, f.max_range());
            assert_eq!(*count, 0);
        }
    }

    #[test]
    fn tracks_minimum_and_near_count_per_slice() {
        // 10 columns, 2 slices of 5 columns; rows 0..4 scanned.
        let mut data = vec![3000u16; 40];
        data[10 + 1] = 1500; // row 1, slice 0
        data[20 + 2] = 800; // row 2, slice 0
        data[30 + 7] = 2500; // row 3, slice 1
        let f = DepthFrame::new(data, 10, 4, FRAC_PI_2, FRAC_PI_3, 0.001).expect("frame");
        let params = PolarHistParams::new(FRAC_PI_2 / 2.0, 2.0, 0.5);

        let hist = build_histogram(&f, &params).expect("histogram");
        assert_eq!(hist.rows, 0..4);
        assert_relative_eq!(hist.ranges[0], 0.8);
        assert_relative_eq!(hist.ranges[1], 2.5);
        assert_eq!(hist.density_count, vec![2, 0]);
        assert_eq!(hist.slice_pixel_count(), 20);
        assert_relative_eq!(hist.density_ratio(0), 0.1);
    }

    #[test]
    fn rows_outside_the_band_are_ignored() {
        // Height 30: band is rows 5..25.
        let mut data = vec![0u16; 10 * 30];
        for x in 0..10 {
            data[2 * 10 + x] = 100; // row 2, outside
            data[27 * 10 + x] = 100; // row 27, outside
        }
        let f = DepthFrame::new(data, 10, 30, FRAC_PI_2, FRAC_PI_3, 0.001).expect("frame");
        let hist = build_histogram(&f, &PolarHistParams::new(FRAC_PI_2, 2.0, 0.5))
            .expect("histogram");
        assert_eq!(hist.rows, 5..25);
        assert_eq!(hist.ranges, vec![f.max_range()]);
        assert_eq!(hist.density_count, vec![0]);
    }
}
