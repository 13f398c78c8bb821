//! Geodetic (longitude/latitude/elevation) to body-local Cartesian conversion.
//!
//! Body-local axes: +Y is the north pole, longitude 0 on the equator lies on +X
//! and longitude +90° on +Z. All distances are in meters.

use std::fmt;

use glam::{DVec2, DVec3};

/// Equatorial and polar radii of a body's reference ellipsoid, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Radii {
    /// Radius in the equatorial plane (shared by both horizontal axes).
    pub equatorial: f64,
    /// Radius along the rotation axis.
    pub polar: f64,
}

impl Radii {
    /// Degenerate radii used when a body is not known at all.
    pub const ZERO: Self = Self {
        equatorial: 0.0,
        polar: 0.0,
    };

    /// Create radii for an oblate ellipsoid.
    pub fn new(equatorial: f64, polar: f64) -> Self {
        Self { equatorial, polar }
    }

    /// Create radii for a perfect sphere.
    pub fn spherical(radius: f64) -> Self {
        Self {
            equatorial: radius,
            polar: radius,
        }
    }
}

/// A position on a body expressed as longitude, latitude, and elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticPosition {
    /// Longitude in degrees. Positive = east.
    pub longitude: f64,
    /// Latitude in degrees. Range: \[-90, 90\].
    pub latitude: f64,
    /// Elevation above the terrain surface in meters.
    pub elevation: f64,
}

impl GeodeticPosition {
    /// Create a new geodetic position.
    pub fn new(longitude: f64, latitude: f64, elevation: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation,
        }
    }

    /// Longitude and latitude in radians, packed as `(lng, lat)`.
    pub fn lng_lat_radians(&self) -> DVec2 {
        DVec2::new(self.longitude.to_radians(), self.latitude.to_radians())
    }
}

impl fmt::Display for GeodeticPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.3}\u{00B0}{}, {:.3}\u{00B0}{}, {:.0}m elev",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir,
            self.elevation,
        )
    }
}

/// Unit surface normal of a sphere at the given `(lng, lat)` in radians.
pub fn surface_normal(lng_lat: DVec2) -> DVec3 {
    let (sin_lng, cos_lng) = lng_lat.x.sin_cos();
    let (sin_lat, cos_lat) = lng_lat.y.sin_cos();
    DVec3::new(cos_lat * cos_lng, sin_lat, cos_lat * sin_lng)
}

/// Convert `(lng, lat)` in radians plus a height above the ellipsoid into a
/// body-local Cartesian point.
pub fn to_cartesian(lng_lat: DVec2, radii: Radii, height: f64) -> DVec3 {
    let normal = surface_normal(lng_lat);
    let squared = DVec3::new(
        radii.equatorial * radii.equatorial,
        radii.polar * radii.polar,
        radii.equatorial * radii.equatorial,
    );
    let k = normal * squared;
    let gamma = k.dot(normal).sqrt();

    // Zero radii collapse the surface onto the body center.
    let surface = if gamma > 0.0 { k / gamma } else { DVec3::ZERO };
    surface + normal * height
}

/// Compute the anchor point for an item placed at `position` on a body.
///
/// The height above the reference surface is the sampled `terrain_height`
/// plus the position's own elevation. The equatorial radius is used for both
/// ellipsoid axes, so the surface is a sphere of that radius.
pub fn place(position: &GeodeticPosition, radii: Radii, terrain_height: f64) -> DVec3 {
    to_cartesian(
        position.lng_lat_radians(),
        Radii::spherical(radii.equatorial),
        terrain_height + position.elevation,
    )
}
