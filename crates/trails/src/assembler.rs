//! Composition of distance accumulation and profile analysis into the
//! persisted shape of a trail's geometry.

use crate::{
    distance,
    errors::AppError,
    eta::EtaConfig,
    models::{Coordinates, CoordinatesWithAltitude, TrailCoordinates, TrailStatistics},
    profile,
};

/// The complete, internally consistent triple the persistence layer
/// stores on every trail create or replace.
#[derive(Debug, Clone)]
pub struct AssembledTrail {
    pub coordinates: Vec<TrailCoordinates>,
    pub statistics: TrailStatistics,
    /// Path geometry: the coordinate sequence with altitude and distance
    /// stripped, order preserved.
    pub geo_line: Vec<Coordinates>,
}

/// Assembles geometry, statistics, and the simplified line from raw
/// imported coordinates.
///
/// The accumulator runs exactly once; its output feeds both the stored
/// coordinate list and the analyzer, so there is one source of truth for
/// cumulative distance. Fails whole, never partially.
pub fn assemble(
    raw_points: &[CoordinatesWithAltitude],
    eta_config: &EtaConfig,
) -> Result<AssembledTrail, AppError> {
    if raw_points.len() < 2 {
        return Err(AppError::InvalidGeometry(format!(
            "a trail needs at least 2 coordinates, got {}",
            raw_points.len()
        )));
    }

    let coordinates = distance::accumulate(raw_points)?;
    let statistics = profile::analyze(&coordinates, eta_config)?;
    let geo_line = coordinates.iter().map(|c| c.as_coordinates()).collect();

    Ok(AssembledTrail {
        coordinates,
        statistics,
        geo_line,
    })
}
