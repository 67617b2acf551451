//! Capability traits connecting sensors, detectors and avoidance strategies.

/// Turns one sensor input into an ordered detection sequence.
///
/// Implementors own their result buffer: each call clears and refills it
/// and returns a view into it. The borrow ends at the next call, so a
/// caller cannot hold on to a stale result.
pub trait Detector {
    /// Sensor payload the detector consumes.
    type Input: ?Sized;
    /// Element of the detection sequence.
    type Output;

    fn detect(&mut self, input: &Self::Input) -> &[Self::Output];
}

/// Reacts to a detection sequence by commanding a vehicle.
pub trait CollisionAvoidanceStrategy<D> {
    fn avoid(&mut self, detection: &[D]);
}
