//! Core types and utilities for depth-based obstacle detection.
//!
//! This crate is intentionally small. It holds the data model shared by the
//! detectors and avoidance strategies (depth frames, spherical coordinates,
//! obstacles), the capability traits that connect them, and a few geometry
//! helpers. It does *not* depend on any concrete camera driver or vehicle.

mod camera;
mod capability;
mod frame;
mod logger;
mod math;
mod obstacle;

pub use camera::DepthCamera;
pub use capability::{CollisionAvoidanceStrategy, Detector};
pub use frame::{DepthFrame, DepthImageView, FrameError, INVALID_DEPTH};
pub use math::{cartesian_to_spherical, spherical_to_cartesian};
pub use nalgebra::Vector3;
pub use obstacle::{BoundingBox, Obstacle, PolarVector};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, LOG_ENV};
