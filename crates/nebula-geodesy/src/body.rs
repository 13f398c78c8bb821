//! Celestial body lookup: reference radii and terrain height by body name.

use glam::DVec2;
use rustc_hash::FxHashMap;

use crate::geodetic::Radii;
use crate::terrain::{TerrainParams, TerrainSampler};

/// Resolves celestial bodies by name.
///
/// Both queries return `None` for a body the lookup does not know.
pub trait BodyLookup {
    /// Equatorial and polar radii of the named body.
    fn radii(&self, name: &str) -> Option<Radii>;

    /// Terrain height in meters at `(lng, lat)` in radians.
    fn surface_height(&self, name: &str, lng_lat: DVec2) -> Option<f64>;
}

/// A body with a reference ellipsoid and optional procedural terrain.
pub struct CelestialBody {
    /// Body name, e.g. `"Earth"`.
    pub name: String,
    /// Reference ellipsoid radii.
    pub radii: Radii,
    terrain: Option<TerrainSampler>,
}

impl CelestialBody {
    /// A body whose surface coincides with its reference ellipsoid.
    pub fn flat(name: impl Into<String>, radii: Radii) -> Self {
        Self {
            name: name.into(),
            radii,
            terrain: None,
        }
    }

    /// A body with fBm terrain on top of its reference ellipsoid.
    pub fn with_terrain(name: impl Into<String>, radii: Radii, params: TerrainParams) -> Self {
        Self {
            name: name.into(),
            radii,
            terrain: Some(TerrainSampler::new(params)),
        }
    }

    /// Terrain height at `(lng, lat)` in radians; zero for flat bodies.
    pub fn height(&self, lng_lat: DVec2) -> f64 {
        self.terrain
            .as_ref()
            .map_or(0.0, |terrain| terrain.sample(lng_lat))
    }
}

/// In-memory [`BodyLookup`] keyed by body name.
#[derive(Default)]
pub struct BodyCatalog {
    bodies: FxHashMap<String, CelestialBody>,
}

impl BodyCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body, replacing any previous body with the same name.
    pub fn insert(&mut self, body: CelestialBody) {
        if self.bodies.contains_key(&body.name) {
            log::debug!("Replacing body '{}' in catalog", body.name);
        }
        self.bodies.insert(body.name.clone(), body);
    }

    /// Look up a body by name.
    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.get(name)
    }

    /// Number of bodies in the catalog.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` if the catalog holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl BodyLookup for BodyCatalog {
    fn radii(&self, name: &str) -> Option<Radii> {
        self.get(name).map(|body| body.radii)
    }

    fn surface_height(&self, name: &str, lng_lat: DVec2) -> Option<f64> {
        self.get(name).map(|body| body.height(lng_lat))
    }
}
