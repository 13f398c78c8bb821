//! The observer whose viewpoint anchored content is kept legible for.

use glam::DVec3;

/// The moving viewpoint of the simulation.
pub trait ObserverModel {
    /// Observer position in world coordinates at `time`.
    fn position(&self, time: f64) -> DVec3;

    /// Distance in meters from the observer to a world-space point at `time`.
    fn distance_to(&self, point: DVec3, time: f64) -> f64 {
        (point - self.position(time)).length()
    }
}

/// An observer parked at a fixed world position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedObserver {
    pub position: DVec3,
}

impl FixedObserver {
    pub fn new(position: DVec3) -> Self {
        Self { position }
    }
}

impl ObserverModel for FixedObserver {
    fn position(&self, _time: f64) -> DVec3 {
        self.position
    }
}
