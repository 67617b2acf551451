//! High-level facade crate for the `coav-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core types, detectors and avoidance strategies
//! - a JSON configuration format shared by tools ([`config`])
//! - (feature-gated) helpers that load 16-bit depth images from disk and run
//!   a detector on them ([`io`])
//!
//! ## Quickstart
//!
//! ```no_run
//! use coav::config::DetectConfig;
//! use coav::{io, Detector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DetectConfig::default();
//! let frame = io::load_depth_png("depth.png", &config.camera)?;
//!
//! let mut detector = config.polar_hist_detector()?;
//! for obstacle in detector.detect(&frame) {
//!     println!("obstacle at {:.2} m, azimuth {:.3} rad", obstacle.center.len, obstacle.center.theta);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `coav::core`: frames, spherical coordinates, obstacles, capability traits.
//! - `coav::detection`: polar-histogram and binary depth detectors.
//! - `coav::avoidance`: vehicle command trait and the stop-and-hold strategy.
//! - `coav::io` (feature `image`): depth image loading.

pub use coav_avoidance as avoidance;
pub use coav_core as core;
pub use coav_detection as detection;

pub use coav_core::{
    CollisionAvoidanceStrategy, DepthCamera, DepthFrame, Detector, Obstacle, PolarVector,
};
pub use coav_detection::{
    DepthImagePolarHistDetector, DepthImageSimpleDetector, PolarHistParams, SimpleDetectorParams,
};

pub mod config;

#[cfg(feature = "image")]
pub mod io;
