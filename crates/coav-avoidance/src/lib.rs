//! Collision avoidance strategies.
//!
//! A strategy consumes the output of a [`coav_core::Detector`] once per
//! frame and turns it into commands for a [`Vehicle`]. The vehicle side is
//! a trait only; wire it to your autopilot link.

mod stop;
mod vehicle;

pub use stop::{AvoidanceState, StopAvoidance, StopAvoidanceParams};
pub use vehicle::Vehicle;
