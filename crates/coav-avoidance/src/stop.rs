use std::f64::consts::FRAC_PI_2;

use coav_core::{CollisionAvoidanceStrategy, Obstacle};
use log::info;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::Vehicle;

/// Where the stop strategy currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvoidanceState {
    /// Path ahead is free; the mission is in control.
    #[default]
    Clear,
    /// An obstacle is ahead; the vehicle was told to brake and hold.
    Braking,
}

/// Parameters of [`StopAvoidance`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopAvoidanceParams {
    /// Half width of the forward cone, around azimuth `π/2`, in which an
    /// obstacle blocks the path (degrees).
    pub forward_half_angle_deg: f64,
    /// Obstacles farther than this along the forward axis are ignored.
    /// `None` reacts to anything the detector reports.
    pub stop_distance: Option<f64>,
}

impl Default for StopAvoidanceParams {
    fn default() -> Self {
        Self {
            forward_half_angle_deg: 15.0,
            stop_distance: None,
        }
    }
}

/// Brake-and-hold strategy.
///
/// The vehicle brakes once when an obstacle shows up ahead and stays steady
/// until a detection reports the path free again, at which point control
/// is released back to the mission.
pub struct StopAvoidance<V> {
    vehicle: V,
    params: StopAvoidanceParams,
    state: AvoidanceState,
}

impl<V: Vehicle> StopAvoidance<V> {
    pub fn new(vehicle: V) -> Self {
        Self::with_params(vehicle, StopAvoidanceParams::default())
    }

    pub fn with_params(vehicle: V, params: StopAvoidanceParams) -> Self {
        Self {
            vehicle,
            params,
            state: AvoidanceState::Clear,
        }
    }

    #[inline]
    pub fn state(&self) -> AvoidanceState {
        self.state
    }

    #[inline]
    pub fn params(&self) -> &StopAvoidanceParams {
        &self.params
    }

    #[inline]
    pub fn vehicle(&self) -> &V {
        &self.vehicle
    }

    pub fn into_vehicle(self) -> V {
        self.vehicle
    }

    /// Whether an obstacle's azimuth extent intersects the forward cone
    /// within the stop distance.
    pub fn blocks_path(&self, obstacle: &Obstacle) -> bool {
        let half = self.params.forward_half_angle_deg.to_radians();
        if !obstacle.overlaps_azimuth(FRAC_PI_2 - half, FRAC_PI_2 + half) {
            return false;
        }
        match self.params.stop_distance {
            Some(limit) => obstacle.center_point().y <= limit,
            None => true,
        }
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    fn update(&mut self, blocked: bool) {
        match (self.state, blocked) {
            (AvoidanceState::Clear, true) => {
                info!("obstacle ahead, braking");
                self.vehicle.brake();
                self.state = AvoidanceState::Braking;
            }
            (AvoidanceState::Braking, false) => {
                info!("path clear, releasing control");
                self.vehicle.release();
                self.state = AvoidanceState::Clear;
            }
            _ => {}
        }
    }
}

/// Binary detection: the first element tells whether something is ahead.
impl<V: Vehicle> CollisionAvoidanceStrategy<bool> for StopAvoidance<V> {
    fn avoid(&mut self, detection: &[bool]) {
        self.update(detection.first().copied().unwrap_or(false));
    }
}

impl<V: Vehicle> CollisionAvoidanceStrategy<Obstacle> for StopAvoidance<V> {
    fn avoid(&mut self, detection: &[Obstacle]) {
        let blocked = detection.iter().any(|o| self.blocks_path(o));
        self.update(blocked);
    }
}
