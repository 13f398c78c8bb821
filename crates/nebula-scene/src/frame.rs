//! Reference frame naming and motion.

use glam::{DAffine3, DQuat, DVec3};

use crate::error::SceneError;

/// Check that a center/frame pair is well-formed.
///
/// Names must be non-empty, carry no surrounding whitespace, and contain no
/// control characters. Whether the frame actually exists is the registry's call.
pub fn validate_frame_name(center: &str, frame: &str) -> Result<(), SceneError> {
    for name in [center, frame] {
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.trim() != name {
            Some("name has surrounding whitespace")
        } else if name.chars().any(char::is_control) {
            Some("name contains control characters")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SceneError::InvalidFrameName {
                center: center.to_string(),
                frame: frame.to_string(),
                reason,
            });
        }
    }
    Ok(())
}

/// Motion of a body-fixed frame relative to the world frame.
///
/// The frame origin sits at `origin` and the frame spins about `spin_axis`
/// at `spin_rate` radians per second of simulation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameMotion {
    /// Frame origin in world coordinates (meters).
    pub origin: DVec3,
    /// Unit rotation axis in world coordinates.
    pub spin_axis: DVec3,
    /// Angular rate in radians per second.
    pub spin_rate: f64,
}

impl FrameMotion {
    /// A frame that does not move relative to the world.
    pub fn fixed(origin: DVec3) -> Self {
        Self {
            origin,
            spin_axis: DVec3::Y,
            spin_rate: 0.0,
        }
    }

    /// A frame rotating about world +Y with the given period in seconds.
    pub fn rotating(origin: DVec3, period_s: f64) -> Self {
        Self {
            origin,
            spin_axis: DVec3::Y,
            spin_rate: std::f64::consts::TAU / period_s,
        }
    }

    /// Transform from body-frame coordinates to world coordinates at `time`.
    pub fn world_from_body(&self, time: f64) -> DAffine3 {
        let rotation = DQuat::from_axis_angle(self.spin_axis, self.spin_rate * time);
        DAffine3::from_rotation_translation(rotation, self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names_accepted() {
        assert!(validate_frame_name("Earth", "IAU_Earth").is_ok());
        assert!(validate_frame_name("Solar System Barycenter", "J2000").is_ok());
    }

    #[test]
    fn test_malformed_names_rejected() {
        let cases = [
            ("", "IAU_Earth"),
            ("Earth", ""),
            (" Earth", "IAU_Earth"),
            ("Earth", "IAU\nEarth"),
        ];
        for (center, frame) in cases {
            let result = validate_frame_name(center, frame);
            assert!(
                matches!(result, Err(SceneError::InvalidFrameName { .. })),
                "{center:?}/{frame:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_fixed_frame_is_translation_only() {
        let motion = FrameMotion::fixed(DVec3::new(1.0, 2.0, 3.0));
        let p = motion.world_from_body(1234.0).transform_point3(DVec3::X);
        assert!((p - DVec3::new(2.0, 2.0, 3.0)).length() < 1e-12);
    }

    #[test]
    fn test_rotating_frame_completes_period() {
        let motion = FrameMotion::rotating(DVec3::ZERO, 86_400.0);
        let quarter = motion.world_from_body(21_600.0).transform_point3(DVec3::X);
        // A positive rotation about +Y carries +X towards -Z.
        assert!((quarter - DVec3::NEG_Z).length() < 1e-9, "got {quarter}");
        let full = motion.world_from_body(86_400.0).transform_point3(DVec3::X);
        assert!((full - DVec3::X).length() < 1e-9, "got {full}");
    }
}
