//! Celestial anchors: position/orientation/scale handles attached to a body frame.

use glam::{DAffine3, DQuat, DVec3};

use crate::registry::AnchorId;

/// A transform anchored in a named reference frame of a celestial body.
///
/// Created through [`AnchorRegistry::create_anchor`](crate::AnchorRegistry::create_anchor)
/// and owned by whoever placed it. The registry only keeps a key to it.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialAnchor {
    center: String,
    frame: String,
    position: DVec3,
    rotation: DQuat,
    scale: f64,
    id: Option<AnchorId>,
}

impl CelestialAnchor {
    pub(crate) fn new(center: &str, frame: &str) -> Self {
        Self {
            center: center.to_string(),
            frame: frame.to_string(),
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: 1.0,
            id: None,
        }
    }

    /// Name of the body this anchor is attached to.
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Name of the reference frame this anchor is expressed in.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Registry key, once registered.
    pub fn id(&self) -> Option<AnchorId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: Option<AnchorId>) {
        self.id = id;
    }

    /// Position in body-frame coordinates (meters).
    pub fn anchor_position(&self) -> DVec3 {
        self.position
    }

    pub fn set_anchor_position(&mut self, position: DVec3) {
        self.position = position;
    }

    pub fn anchor_rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn set_anchor_rotation(&mut self, rotation: DQuat) {
        self.rotation = rotation.normalize();
    }

    /// Uniform scale applied to everything attached below this anchor.
    pub fn anchor_scale(&self) -> f64 {
        self.scale
    }

    pub fn set_anchor_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// The anchor's local +Y axis in body-frame coordinates.
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// Transform from anchor-local to body-frame coordinates.
    pub fn local_transform(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(
            DVec3::splat(self.scale),
            self.rotation,
            self.position,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_anchor_is_identity() {
        let anchor = CelestialAnchor::new("Earth", "IAU_Earth");
        assert_eq!(anchor.center(), "Earth");
        assert_eq!(anchor.frame(), "IAU_Earth");
        assert_eq!(anchor.local_transform(), DAffine3::IDENTITY);
        assert!(anchor.id().is_none());
    }

    #[test]
    fn test_local_transform_applies_scale_then_rotation_then_translation() {
        let mut anchor = CelestialAnchor::new("Earth", "IAU_Earth");
        anchor.set_anchor_position(DVec3::new(10.0, 0.0, 0.0));
        anchor.set_anchor_rotation(DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2));
        anchor.set_anchor_scale(2.0);

        let p = anchor.local_transform().transform_point3(DVec3::X);
        assert!(
            (p - DVec3::new(10.0, 0.0, -2.0)).length() < 1e-12,
            "unexpected point {p}"
        );
    }
}
