//! Test data generation for trail-atlas.
//!
//! Provides seeded synthetic trail generation and GPX fixture writing to
//! support manual verification and the API seeder binary.

pub mod gpx;
pub mod track;

pub use gpx::generate_gpx;
pub use track::{Region, TrailGenerator};
