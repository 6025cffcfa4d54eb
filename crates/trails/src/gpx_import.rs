use bytes::Bytes;
use gpx::{Gpx, read};

use crate::{errors::AppError, models::CoordinatesWithAltitude};

/// Extracts the ordered coordinate sequence from an uploaded GPX file.
///
/// Track points are flattened across tracks and segments in document
/// order. Every point must carry an elevation tag: trail statistics are
/// derived from altitude, and this service does not acquire elevation
/// data on its own.
pub fn parse_trail_coordinates(content: &Bytes) -> Result<Vec<CoordinatesWithAltitude>, AppError> {
    let gpx: Gpx = read(content.as_ref())
        .map_err(|e| AppError::GpxParsing(format!("Failed to parse GPX: {}", e)))?;

    let mut points = Vec::new();

    for track in &gpx.tracks {
        for segment in &track.segments {
            for point in &segment.points {
                let altitude = point.elevation.ok_or_else(|| {
                    AppError::InvalidGeometry(format!(
                        "track point {} has no elevation tag",
                        points.len()
                    ))
                })?;
                points.push(CoordinatesWithAltitude::new(
                    point.point().x(),
                    point.point().y(),
                    altitude,
                )?);
            }
        }
    }

    if points.is_empty() {
        return Err(AppError::InvalidGeometry(
            "No track points found in GPX file".to_string(),
        ));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GPX_WITH_ELEVATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg>
    <trkpt lat="44.000" lon="10.000"><ele>100.0</ele></trkpt>
    <trkpt lat="44.000" lon="10.001"><ele>150.0</ele></trkpt>
    <trkpt lat="44.000" lon="10.002"><ele>120.0</ele></trkpt>
  </trkseg></trk>
</gpx>"#;

    const GPX_MISSING_ELEVATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg>
    <trkpt lat="44.000" lon="10.000"><ele>100.0</ele></trkpt>
    <trkpt lat="44.000" lon="10.001"></trkpt>
  </trkseg></trk>
</gpx>"#;

    const GPX_EMPTY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg></trkseg></trk>
</gpx>"#;

    #[test]
    fn test_parses_points_in_document_order() {
        let points = parse_trail_coordinates(&Bytes::from(GPX_WITH_ELEVATION)).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].longitude, 10.000);
        assert_eq!(points[0].latitude, 44.000);
        assert_eq!(points[0].altitude, 100.0);
        assert_eq!(points[2].altitude, 120.0);
    }

    #[test]
    fn test_missing_elevation_is_invalid_geometry() {
        let result = parse_trail_coordinates(&Bytes::from(GPX_MISSING_ELEVATION));
        assert!(matches!(result, Err(AppError::InvalidGeometry(_))));
    }

    #[test]
    fn test_empty_track_is_invalid_geometry() {
        let result = parse_trail_coordinates(&Bytes::from(GPX_EMPTY));
        assert!(matches!(result, Err(AppError::InvalidGeometry(_))));
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let result = parse_trail_coordinates(&Bytes::from_static(b"not xml at all"));
        assert!(matches!(result, Err(AppError::GpxParsing(_))));
    }
}
