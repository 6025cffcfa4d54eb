use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// A raw longitude/latitude pair on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, AppError> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidGeometry(format!(
                "longitude out of range: {longitude}"
            )));
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidGeometry(format!(
                "latitude out of range: {latitude}"
            )));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// A geo-point tagged with an altitude in meters (may be below sea level).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoordinatesWithAltitude {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

impl CoordinatesWithAltitude {
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Result<Self, AppError> {
        let coordinates = Coordinates::new(longitude, latitude)?;
        if !altitude.is_finite() {
            return Err(AppError::InvalidGeometry(format!(
                "altitude is not finite: {altitude}"
            )));
        }
        Ok(Self {
            longitude: coordinates.longitude,
            latitude: coordinates.latitude,
            altitude,
        })
    }

    pub fn as_coordinates(&self) -> Coordinates {
        Coordinates {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

/// A trail coordinate: an altitude-tagged point plus its cumulative
/// distance from the trail start in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrailCoordinates {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub distance_from_trail_start: f64,
}

impl TrailCoordinates {
    pub fn builder() -> TrailCoordinatesBuilder {
        TrailCoordinatesBuilder::default()
    }

    pub fn as_coordinates(&self) -> Coordinates {
        Coordinates {
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

/// Builder for [`TrailCoordinates`]. Construction fails unless every
/// field has been supplied with a valid value.
#[derive(Debug, Default)]
pub struct TrailCoordinatesBuilder {
    longitude: Option<f64>,
    latitude: Option<f64>,
    altitude: Option<f64>,
    distance_from_trail_start: Option<f64>,
}

impl TrailCoordinatesBuilder {
    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn distance_from_trail_start(mut self, distance: f64) -> Self {
        self.distance_from_trail_start = Some(distance);
        self
    }

    pub fn build(self) -> Result<TrailCoordinates, AppError> {
        let missing =
            |field: &str| AppError::InvalidGeometry(format!("trail coordinate is missing {field}"));
        let point = CoordinatesWithAltitude::new(
            self.longitude.ok_or_else(|| missing("longitude"))?,
            self.latitude.ok_or_else(|| missing("latitude"))?,
            self.altitude.ok_or_else(|| missing("altitude"))?,
        )?;
        let distance = self
            .distance_from_trail_start
            .ok_or_else(|| missing("distance_from_trail_start"))?;
        if !distance.is_finite() || distance < 0.0 {
            return Err(AppError::InvalidGeometry(format!(
                "distance from trail start must be non-negative, got {distance}"
            )));
        }
        Ok(TrailCoordinates {
            longitude: point.longitude,
            latitude: point.latitude,
            altitude: point.altitude,
            distance_from_trail_start: distance,
        })
    }
}

/// Aggregate statistics derived from a trail's coordinate sequence.
/// Recomputed from scratch on every trail write, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrailStatistics {
    /// Sum of positive altitude deltas, meters.
    pub total_rise: f64,
    /// Sum of absolute negative altitude deltas, meters.
    pub total_fall: f64,
    /// Estimated walking time, minutes.
    pub eta: f64,
    /// Ground-track length, meters.
    pub length: f64,
}

/// A stored trail: coordinate sequence, derived statistics, and the
/// simplified line used as path geometry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Trail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coordinates: Vec<TrailCoordinates>,
    pub statistics: TrailStatistics,
    /// Order-identical projection of `coordinates` with altitude and
    /// distance stripped.
    pub geo_line: Vec<Coordinates>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A point of interest, geo-located independently of any trail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Poi {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub position: Coordinates,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Poi {
    pub fn new(name: String, description: String, position: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            position,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Platform-wide counters for the stats endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct Stats {
    pub trail_count: i64,
    pub poi_count: i64,
}
