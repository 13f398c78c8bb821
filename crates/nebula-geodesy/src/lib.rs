//! Geodetic math for celestial bodies: ellipsoid radii, longitude/latitude/elevation
//! to body-local Cartesian conversion, and a catalog of known bodies with
//! optional procedural terrain.

mod body;
mod geodetic;
mod terrain;

pub use body::{BodyCatalog, BodyLookup, CelestialBody};
pub use geodetic::{GeodeticPosition, Radii, place, surface_normal, to_cartesian};
pub use terrain::{TerrainParams, TerrainSampler};
