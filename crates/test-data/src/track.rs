//! Synthetic trail generation.
//!
//! Produces plausible mountain-trail coordinate sequences: a meandering
//! horizontal walk with a noisy, gently climbing elevation profile.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use trails::models::CoordinatesWithAltitude;

/// A rectangular region to generate trails inside.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub min_longitude: f64,
    pub min_latitude: f64,
    pub max_longitude: f64,
    pub max_latitude: f64,
}

impl Region {
    /// Western Dolomites.
    pub const DOLOMITES: Region = Region {
        min_longitude: 11.0,
        min_latitude: 46.2,
        max_longitude: 12.2,
        max_latitude: 46.8,
    };

    /// Tuscan-Emilian Apennines.
    pub const APENNINES: Region = Region {
        min_longitude: 10.0,
        min_latitude: 44.0,
        max_longitude: 11.0,
        max_latitude: 44.5,
    };

    fn clamp(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        (
            longitude.clamp(self.min_longitude, self.max_longitude),
            latitude.clamp(self.min_latitude, self.max_latitude),
        )
    }
}

/// Seeded generator for reproducible trail fixtures.
pub struct TrailGenerator {
    rng: StdRng,
}

impl TrailGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates an ordered coordinate sequence of `point_count` points
    /// inside `region`. Steps are roughly 40-90 m apart with a drifting
    /// heading; altitude does a noisy random walk with a slight upward
    /// bias.
    pub fn generate(
        &mut self,
        region: &Region,
        point_count: usize,
    ) -> Vec<CoordinatesWithAltitude> {
        let mut longitude = self
            .rng
            .gen_range(region.min_longitude..region.max_longitude);
        let mut latitude = self.rng.gen_range(region.min_latitude..region.max_latitude);
        let mut altitude = self.rng.gen_range(600.0..1800.0);
        let mut heading: f64 = self.rng.gen_range(0.0..std::f64::consts::TAU);

        let heading_drift = Normal::new(0.0, 0.35).expect("valid normal");
        let altitude_step = Normal::new(2.0, 12.0).expect("valid normal");

        let mut points = Vec::with_capacity(point_count);
        for _ in 0..point_count {
            let (lon, lat) = region.clamp(longitude, latitude);
            let point = CoordinatesWithAltitude::new(lon, lat, altitude)
                .expect("generated coordinate stays in range");
            points.push(point);

            let step = self.rng.gen_range(0.0004..0.0009);
            heading += heading_drift.sample(&mut self.rng);
            longitude += step * heading.cos();
            latitude += step * heading.sin();
            altitude = (altitude + altitude_step.sample(&mut self.rng)).max(-400.0);
        }
        points
    }
}
