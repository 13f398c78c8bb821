//! Fractal Brownian motion terrain heights sampled on the unit sphere.
//!
//! Sampling in 3D sphere coordinates keeps the height field seamless across
//! the antimeridian and at the poles.

use glam::{DVec2, DVec3};
use noise::{NoiseFn, Simplex};

use crate::geodetic::surface_normal;

/// Configuration for multi-octave fBm terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Seed for deterministic generation.
    pub seed: u32,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles per unit-sphere radius.
    pub base_frequency: f64,
    /// Amplitude of the first octave in meters.
    pub amplitude: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 4.0,
            amplitude: 4000.0,
        }
    }
}

/// Samples terrain height in meters relative to the reference surface.
pub struct TerrainSampler {
    noise: Simplex,
    params: TerrainParams,
}

impl TerrainSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: TerrainParams) -> Self {
        let noise = Simplex::new(params.seed);
        Self { noise, params }
    }

    /// Sample the height at a point on the unit sphere.
    pub fn sample_direction(&self, dir: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            let p = dir * frequency;
            total += self.noise.get([p.x, p.y, p.z]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Sample the height at `(lng, lat)` in radians.
    pub fn sample(&self, lng_lat: DVec2) -> f64 {
        self.sample_direction(surface_normal(lng_lat))
    }

    /// Upper bound of the absolute height this sampler can produce.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amplitude;
            amplitude *= self.params.persistence;
        }
        sum
    }
}
