//! A small Earth-Moon system and an observer orbiting Earth.

use glam::DVec3;
use nebula_geodesy::{BodyCatalog, CelestialBody, Radii, TerrainParams};
use nebula_scene::{FrameMotion, FrameRegistry, ObserverModel, SceneError};

pub const EARTH_RADII: Radii = Radii {
    equatorial: 6_378_137.0,
    polar: 6_356_752.314_245,
};
pub const MOON_RADIUS: f64 = 1_737_400.0;

/// Sidereal day in seconds.
const EARTH_ROTATION_PERIOD: f64 = 86_164.1;
const MOON_DISTANCE: f64 = 384_400_000.0;

pub fn bodies() -> BodyCatalog {
    let mut catalog = BodyCatalog::new();
    catalog.insert(CelestialBody::flat("Earth", EARTH_RADII));
    catalog.insert(CelestialBody::with_terrain(
        "Moon",
        Radii::spherical(MOON_RADIUS),
        TerrainParams {
            seed: 7,
            amplitude: 3_000.0,
            ..Default::default()
        },
    ));
    catalog
}

pub fn frames() -> Result<FrameRegistry, SceneError> {
    let mut registry = FrameRegistry::new();
    registry.add_frame(
        "Earth",
        "IAU_Earth",
        FrameMotion::rotating(DVec3::ZERO, EARTH_ROTATION_PERIOD),
    )?;
    registry.add_frame("Earth", "J2000", FrameMotion::fixed(DVec3::ZERO))?;
    registry.add_frame(
        "Moon",
        "IAU_Moon",
        FrameMotion::fixed(DVec3::new(MOON_DISTANCE, 0.0, 0.0)),
    )?;
    Ok(registry)
}

/// Observer on an inclined circular orbit around the world origin.
#[derive(Clone, Copy, Debug)]
pub struct OrbitingObserver {
    pub radius: f64,
    pub period: f64,
    /// Orbit inclination against the equatorial plane, radians.
    pub inclination: f64,
}

impl ObserverModel for OrbitingObserver {
    fn position(&self, time: f64) -> DVec3 {
        let angle = std::f64::consts::TAU * time / self.period;
        let (sin_a, cos_a) = angle.sin_cos();
        let (sin_i, cos_i) = self.inclination.sin_cos();
        DVec3::new(cos_a, sin_a * sin_i, sin_a * cos_i) * self.radius
    }
}
