//! Depth-image obstacle detectors built on top of `coav-core`.
//!
//! ## Quickstart
//!
//! ```
//! use coav_core::{DepthFrame, Detector};
//! use coav_detection::{DepthImagePolarHistDetector, PolarHistParams};
//! use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};
//!
//! let params = PolarHistParams::with_angle_step_deg(9.0, 2.0, 0.5);
//! let mut detector = DepthImagePolarHistDetector::new(params).unwrap();
//!
//! let frame = DepthFrame::new(vec![1000; 100 * 20], 100, 20, FRAC_PI_2, FRAC_PI_3, 0.001).unwrap();
//! let obstacles = detector.detect(&frame);
//! assert_eq!(obstacles.len(), 10);
//! ```
//!
//! Polar-histogram algorithm:
//! 1. Split the horizontal field of view into `ceil(hfov / angle_step)` equal slices.
//! 2. Sweep up to `vertical_sweep_pixels` rows above and below the image midline.
//! 3. Per slice, keep the closest range and count samples closer than `threshold`.
//!    Zero (no return) samples read as the farthest representable range.
//! 4. Report a slice as an obstacle when its closest range is within `threshold`
//!    and its near-sample ratio reaches `density`.
//! 5. Express each obstacle as an angular box in sensor spherical coordinates,
//!    left slice first.

mod error;
mod extract;
mod histogram;
mod params;
mod polar_hist;
mod simple;

pub use error::ParamsError;
pub use extract::extract_obstacles;
pub use histogram::{build_histogram, slice_count, sweep_rows, PolarHistogram};
pub use params::{PolarHistParams, SimpleDetectorParams, DEFAULT_VERTICAL_SWEEP_PIXELS};
pub use polar_hist::DepthImagePolarHistDetector;
pub use simple::DepthImageSimpleDetector;
