//! Proximity search over point-of-interest coordinates.
//!
//! The nearest-neighbor index itself is a storage concern hidden behind
//! [`SpatialIndex`]; this module owns the query contract: validation,
//! ascending-distance ordering with a deterministic tie-break, and the
//! pagination window.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use geo::{Distance as _, Haversine, geometry::Point};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{errors::AppError, models::Coordinates};

/// A point of interest paired with its spherical distance from a query
/// center, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PoiDistance {
    pub poi_id: Uuid,
    pub distance_meters: f64,
}

/// Capability of a backing store that can answer "points within radius".
///
/// Implementations only need to restrict results to the radius ball;
/// ordering and pagination are applied by [`ProximityQuery::run`].
#[async_trait]
pub trait SpatialIndex: Send + Sync {
    async fn insert(&self, poi_id: Uuid, position: Coordinates) -> Result<(), AppError>;

    async fn remove(&self, poi_id: Uuid) -> Result<(), AppError>;

    async fn query_within_radius(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<PoiDistance>, AppError>;
}

/// A validated proximity query. Constructed per request, stateless.
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery {
    center: Coordinates,
    radius_meters: f64,
    page: i64,
    page_size: i64,
}

impl ProximityQuery {
    pub fn new(
        center: Coordinates,
        radius_meters: f64,
        page: i64,
        page_size: i64,
    ) -> Result<Self, AppError> {
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(AppError::InvalidQuery(format!(
                "radius must be positive, got {radius_meters}"
            )));
        }
        if page < 0 {
            return Err(AppError::InvalidQuery(format!(
                "page must be non-negative, got {page}"
            )));
        }
        if page_size <= 0 {
            return Err(AppError::InvalidQuery(format!(
                "page size must be positive, got {page_size}"
            )));
        }
        Ok(Self {
            center,
            radius_meters,
            page,
            page_size,
        })
    }

    /// Runs the query against an index and applies the ordering and
    /// pagination guarantees.
    ///
    /// Results are sorted ascending by distance; equal distances fall
    /// back to ascending POI id so repeated calls paginate identically
    /// over unchanged data. An empty window is `Ok(vec![])`.
    pub async fn run(&self, index: &dyn SpatialIndex) -> Result<Vec<PoiDistance>, AppError> {
        let mut matches = index
            .query_within_radius(self.center, self.radius_meters)
            .await?;

        matches.sort_by(|a, b| {
            a.distance_meters
                .total_cmp(&b.distance_meters)
                .then_with(|| a.poi_id.cmp(&b.poi_id))
        });

        let offset = (self.page * self.page_size) as usize;
        Ok(matches
            .into_iter()
            .skip(offset)
            .take(self.page_size as usize)
            .collect())
    }
}

/// In-memory spherical index over a flat point set.
///
/// A linear scan is plenty for tests and small deployments; production
/// uses the database-backed index instead.
#[derive(Clone, Default)]
pub struct InMemorySpatialIndex {
    points: Arc<RwLock<HashMap<Uuid, Coordinates>>>,
}

impl InMemorySpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpatialIndex for InMemorySpatialIndex {
    async fn insert(&self, poi_id: Uuid, position: Coordinates) -> Result<(), AppError> {
        self.points.write().await.insert(poi_id, position);
        Ok(())
    }

    async fn remove(&self, poi_id: Uuid) -> Result<(), AppError> {
        self.points.write().await.remove(&poi_id);
        Ok(())
    }

    async fn query_within_radius(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<PoiDistance>, AppError> {
        let center_point = Point::new(center.longitude, center.latitude);
        let points = self.points.read().await;
        Ok(points
            .iter()
            .filter_map(|(id, position)| {
                let distance = Haversine.distance(
                    center_point,
                    Point::new(position.longitude, position.latitude),
                );
                (distance <= radius_meters).then_some(PoiDistance {
                    poi_id: *id,
                    distance_meters: distance,
                })
            })
            .collect())
    }
}
