//! Cumulative distance accumulation along an ordered coordinate sequence.

use geo::{Distance as _, Haversine, geometry::Point};

use crate::{
    errors::AppError,
    models::{CoordinatesWithAltitude, TrailCoordinates},
};

/// Computes the per-point cumulative distance from the trail start.
///
/// Segment distances are great-circle (haversine) over the horizontal
/// component only; altitude never contributes. The first point always
/// carries distance 0 and the output has the same length and order as
/// the input.
pub fn accumulate(points: &[CoordinatesWithAltitude]) -> Result<Vec<TrailCoordinates>, AppError> {
    if points.is_empty() {
        return Err(AppError::InvalidGeometry(
            "a trail needs at least one coordinate".to_string(),
        ));
    }

    let mut accumulated = Vec::with_capacity(points.len());
    let mut distance_from_start = 0.0;
    let mut previous: Option<Point> = None;

    for point in points {
        // Re-validates the raw values so malformed input is rejected even
        // when the caller skipped the checked constructors.
        let validated =
            CoordinatesWithAltitude::new(point.longitude, point.latitude, point.altitude)?;
        let here = Point::new(validated.longitude, validated.latitude);

        if let Some(prev) = previous {
            distance_from_start += Haversine.distance(prev, here);
        }
        previous = Some(here);

        accumulated.push(
            TrailCoordinates::builder()
                .longitude(validated.longitude)
                .latitude(validated.latitude)
                .altitude(validated.altitude)
                .distance_from_trail_start(distance_from_start)
                .build()?,
        );
    }

    Ok(accumulated)
}
