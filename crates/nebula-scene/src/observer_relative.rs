//! Keep anchored content legible from a moving observer: distance-based
//! scaling and billboard turning.
//!
//! Both helpers read the observer and the anchor's frame at a given
//! simulation time and only write the anchor's scale or rotation.

use glam::{DMat3, DQuat, DVec3};

use crate::anchor::CelestialAnchor;
use crate::error::SceneError;
use crate::observer::ObserverModel;
use crate::registry::AnchorRegistry;

/// Below this ratio of horizontal to total observer offset the facing
/// direction is considered undefined.
const DEGENERATE_FACING: f64 = 1e-9;

/// Bounds of the distance-based scale curve.
///
/// Between the bounds the anchor scale grows linearly with distance, which keeps
/// the apparent angular size constant. Outside them the factor is clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePolicy {
    /// Distance in meters at which the factor is 1.
    pub reference_distance: f64,
    /// Smallest factor, reached when the observer is close.
    pub min_factor: f64,
    /// Largest factor, reached when the observer is far away.
    pub max_factor: f64,
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self {
            reference_distance: 1000.0,
            min_factor: 1.0,
            max_factor: 1.0e6,
        }
    }
}

impl ScalePolicy {
    /// Scale factor for an observer `distance` meters away.
    ///
    /// Swapped bounds are put back in order; a NaN bound or distance is
    /// ignored in favour of the other bound.
    pub fn factor(&self, distance: f64) -> f64 {
        let low = self.min_factor.min(self.max_factor);
        let high = self.min_factor.max(self.max_factor);
        let ratio = if self.reference_distance > 0.0 {
            distance / self.reference_distance
        } else {
            high
        };
        ratio.max(low).min(high)
    }
}

/// Scale an anchor by its distance to the observer.
///
/// The resulting anchor scale is `base_scale * widget_scale * policy.factor(distance)`.
/// Returns the scale that was applied.
pub fn scale_relative_to_observer(
    anchor: &mut CelestialAnchor,
    registry: &dyn AnchorRegistry,
    observer: &dyn ObserverModel,
    time: f64,
    base_scale: f64,
    widget_scale: f64,
    policy: &ScalePolicy,
) -> Result<f64, SceneError> {
    let world = registry.anchor_world_position(anchor, time)?;
    let distance = observer.distance_to(world, time);
    let scale = base_scale * widget_scale * policy.factor(distance);
    anchor.set_anchor_scale(scale);
    Ok(scale)
}

/// Rotate an anchor so its local +X axis points at the observer.
///
/// With `full_3d == false` the anchor only yaws about the body's local up
/// (the radial direction through the anchor), so its +Y stays aligned with
/// that up. With `full_3d == true` it also pitches towards the observer.
/// If the facing direction is undefined (observer straight above or below, or
/// at the anchor itself) the current rotation is kept.
pub fn turn_to_observer(
    anchor: &mut CelestialAnchor,
    registry: &dyn AnchorRegistry,
    observer: &dyn ObserverModel,
    time: f64,
    full_3d: bool,
) -> Result<(), SceneError> {
    let world_from_body = registry.anchor_frame_transform(anchor, time)?;
    let observer_body = world_from_body
        .inverse()
        .transform_point3(observer.position(time));

    let position = anchor.anchor_position();
    let to_observer = observer_body - position;
    let up = position.try_normalize().unwrap_or(DVec3::Y);

    let Some(rotation) = facing_rotation(to_observer, up, full_3d) else {
        return Ok(());
    };
    anchor.set_anchor_rotation(rotation);
    Ok(())
}

fn facing_rotation(to_observer: DVec3, up: DVec3, full_3d: bool) -> Option<DQuat> {
    let length = to_observer.length();
    if length <= 0.0 || !length.is_finite() {
        return None;
    }

    let horizontal = to_observer - up * to_observer.dot(up);
    if horizontal.length() <= DEGENERATE_FACING * length {
        return None;
    }

    let (x, y) = if full_3d {
        let x = to_observer / length;
        let z = x.cross(up).normalize();
        (x, z.cross(x))
    } else {
        (horizontal.normalize(), up)
    };
    let z = x.cross(y);

    Some(DQuat::from_mat3(&DMat3::from_cols(x, y, z)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameMotion;
    use crate::observer::FixedObserver;
    use crate::registry::FrameRegistry;

    const RADIUS: f64 = 6_378_137.0;

    fn setup(lng_deg: f64, lat_deg: f64) -> (FrameRegistry, CelestialAnchor) {
        let mut registry = FrameRegistry::new();
        registry
            .add_frame("Earth", "IAU_Earth", FrameMotion::rotating(DVec3::ZERO, 86_400.0))
            .unwrap();
        let mut anchor = registry.create_anchor("Earth", "IAU_Earth").unwrap();
        let (lng, lat) = (lng_deg.to_radians(), lat_deg.to_radians());
        anchor.set_anchor_position(
            DVec3::new(lat.cos() * lng.cos(), lat.sin(), lat.cos() * lng.sin()) * RADIUS,
        );
        registry.register(&mut anchor);
        (registry, anchor)
    }

    #[test]
    fn test_scale_factor_is_monotonic_and_bounded() {
        let policy = ScalePolicy {
            reference_distance: 1000.0,
            min_factor: 0.5,
            max_factor: 50.0,
        };
        let mut previous = 0.0;
        for i in 0..200 {
            let distance = i as f64 * 500.0;
            let factor = policy.factor(distance);
            assert!(factor >= previous, "factor decreased at {distance}");
            assert!((0.5..=50.0).contains(&factor), "factor {factor} out of bounds");
            previous = factor;
        }
    }

    #[test]
    fn test_scale_factor_with_inverted_bounds() {
        let policy = ScalePolicy {
            reference_distance: 1000.0,
            min_factor: 10.0,
            max_factor: 2.0,
        };
        assert_eq!(policy.factor(5000.0), 5.0);
        assert_eq!(policy.factor(100.0), 2.0);
        assert_eq!(policy.factor(1.0e9), 10.0);
    }

    #[test]
    fn test_scale_factor_with_nan_inputs() {
        let policy = ScalePolicy {
            reference_distance: 1000.0,
            min_factor: f64::NAN,
            max_factor: 50.0,
        };
        assert_eq!(policy.factor(5000.0), 50.0);

        let policy = ScalePolicy::default();
        assert_eq!(policy.factor(f64::NAN), policy.min_factor);
    }

    #[test]
    fn test_apparent_size_constant_between_bounds() {
        let policy = ScalePolicy::default();
        let near = policy.factor(2_000.0) / 2_000.0;
        let far = policy.factor(200_000.0) / 200_000.0;
        assert!((near - far).abs() < 1e-12);
    }

    #[test]
    fn test_scale_uses_base_and_widget_scale() {
        let (registry, mut anchor) = setup(0.0, 0.0);
        let observer = FixedObserver::new(DVec3::new(RADIUS + 10_000.0, 0.0, 0.0));
        let policy = ScalePolicy::default();
        let scale = scale_relative_to_observer(
            &mut anchor,
            &registry,
            &observer,
            0.0,
            2.0,
            1.5,
            &policy,
        )
        .unwrap();
        assert!((scale - 30.0).abs() < 1e-6, "expected 2 * 1.5 * 10, got {scale}");
        assert_eq!(anchor.anchor_scale(), scale);
    }

    #[test]
    fn test_scale_is_idempotent() {
        let (registry, mut anchor) = setup(30.0, 10.0);
        let observer = FixedObserver::new(DVec3::new(2.0 * RADIUS, 1.0e5, 3.0e5));
        let policy = ScalePolicy::default();
        let first =
            scale_relative_to_observer(&mut anchor, &registry, &observer, 5.0, 1.0, 1.0, &policy)
                .unwrap();
        let second =
            scale_relative_to_observer(&mut anchor, &registry, &observer, 5.0, 1.0, 1.0, &policy)
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_yaw_only_keeps_local_up() {
        let (registry, mut anchor) = setup(40.0, 25.0);
        let up = anchor.anchor_position().normalize();
        let observers = [
            DVec3::new(RADIUS * 1.2, 0.0, 0.0),
            DVec3::new(0.0, RADIUS * 3.0, 1.0e6),
            DVec3::new(-RADIUS, -RADIUS, RADIUS),
            anchor.anchor_position() + up * 10.0 + DVec3::new(0.5, 0.0, 0.0),
        ];

        for (i, position) in observers.iter().enumerate() {
            let observer = FixedObserver::new(*position);
            turn_to_observer(&mut anchor, &registry, &observer, 0.0, false).unwrap();
            let drift = anchor.up().angle_between(up);
            assert!(drift < 1e-6, "observer {i}: up drifted by {drift} rad");
        }
    }

    #[test]
    fn test_yaw_only_faces_observer_horizontally() {
        let (registry, mut anchor) = setup(0.0, 0.0);
        // Above and to the east (+Z) of the anchor.
        let observer = FixedObserver::new(DVec3::new(RADIUS + 5_000.0, 0.0, 1_000.0));
        turn_to_observer(&mut anchor, &registry, &observer, 0.0, false).unwrap();
        let facing = anchor.anchor_rotation() * DVec3::X;
        assert!((facing - DVec3::Z).length() < 1e-9, "facing {facing}");
    }

    #[test]
    fn test_observer_straight_above_keeps_rotation() {
        let (registry, mut anchor) = setup(0.0, 0.0);
        let before = anchor.anchor_rotation();
        let observer = FixedObserver::new(DVec3::new(RADIUS * 2.0, 0.0, 0.0));
        turn_to_observer(&mut anchor, &registry, &observer, 0.0, false).unwrap();
        assert_eq!(anchor.anchor_rotation(), before);
    }

    #[test]
    fn test_full_3d_points_at_observer() {
        let (registry, mut anchor) = setup(0.0, 0.0);
        let observer = FixedObserver::new(DVec3::new(RADIUS + 1_000.0, 0.0, 1_000.0));
        turn_to_observer(&mut anchor, &registry, &observer, 0.0, true).unwrap();
        let facing = anchor.anchor_rotation() * DVec3::X;
        let expected = DVec3::new(1.0, 0.0, 1.0).normalize();
        assert!((facing - expected).length() < 1e-9, "facing {facing}");
    }

    #[test]
    fn test_turn_accounts_for_frame_rotation() {
        let (registry, mut anchor) = setup(0.0, 0.0);
        // After a quarter day the body's +X axis points along world -Z.
        let time = 21_600.0;
        let observer = FixedObserver::new(DVec3::new(1_000.0, 0.0, -(RADIUS + 5_000.0)));
        turn_to_observer(&mut anchor, &registry, &observer, time, false).unwrap();
        let up = anchor.up();
        assert!((up - DVec3::X).length() < 1e-9);
        // In body coordinates the observer sits east of the anchor.
        let facing = anchor.anchor_rotation() * DVec3::X;
        assert!((facing - DVec3::Z).length() < 1e-6, "facing {facing}");
    }

    #[test]
    fn test_unresolvable_frame_is_an_error() {
        let (mut registry, mut anchor) = setup(0.0, 0.0);
        registry.remove_frame("Earth", "IAU_Earth");
        let observer = FixedObserver::new(DVec3::splat(RADIUS));
        let result = turn_to_observer(&mut anchor, &registry, &observer, 0.0, false);
        assert!(result.is_err());
    }
}
