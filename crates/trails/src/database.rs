use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::assembler::AssembledTrail;
use crate::errors::AppError;
use crate::models::{Coordinates, Poi, Stats, Trail, TrailCoordinates, TrailStatistics};
use crate::spatial::{PoiDistance, SpatialIndex};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

#[derive(FromRow)]
struct TrailRow {
    id: Uuid,
    name: String,
    description: String,
    coordinates: Json<Vec<TrailCoordinates>>,
    total_rise: f64,
    total_fall: f64,
    eta: f64,
    length: f64,
    geo_line: Json<Vec<Coordinates>>,
    created_at: OffsetDateTime,
}

impl From<TrailRow> for Trail {
    fn from(row: TrailRow) -> Self {
        Trail {
            id: row.id,
            name: row.name,
            description: row.description,
            coordinates: row.coordinates.0,
            statistics: TrailStatistics {
                total_rise: row.total_rise,
                total_fall: row.total_fall,
                eta: row.eta,
                length: row.length,
            },
            geo_line: row.geo_line.0,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct PoiRow {
    id: Uuid,
    name: String,
    description: String,
    longitude: f64,
    latitude: f64,
    created_at: OffsetDateTime,
}

impl From<PoiRow> for Poi {
    fn from(row: PoiRow) -> Self {
        Poi {
            id: row.id,
            name: row.name,
            description: row.description,
            position: Coordinates {
                longitude: row.longitude,
                latitude: row.latitude,
            },
            created_at: row.created_at,
        }
    }
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn save_trail(&self, trail: &Trail) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO trails (id, name, description, coordinates,
                                total_rise, total_fall, eta, length,
                                geo_line, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(trail.id)
        .bind(&trail.name)
        .bind(&trail.description)
        .bind(Json(&trail.coordinates))
        .bind(trail.statistics.total_rise)
        .bind(trail.statistics.total_fall)
        .bind(trail.statistics.eta)
        .bind(trail.statistics.length)
        .bind(Json(&trail.geo_line))
        .bind(trail.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces a trail's geometry, statistics, and line in one statement,
    /// so concurrent readers never observe a half-updated trail.
    pub async fn replace_trail(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
        assembled: &AssembledTrail,
    ) -> Result<Option<Trail>, AppError> {
        let row: Option<TrailRow> = sqlx::query_as(
            r#"
            UPDATE trails
            SET name = $2, description = $3, coordinates = $4,
                total_rise = $5, total_fall = $6, eta = $7, length = $8,
                geo_line = $9
            WHERE id = $1
            RETURNING id, name, description, coordinates,
                      total_rise, total_fall, eta, length,
                      geo_line, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(Json(&assembled.coordinates))
        .bind(assembled.statistics.total_rise)
        .bind(assembled.statistics.total_fall)
        .bind(assembled.statistics.eta)
        .bind(assembled.statistics.length)
        .bind(Json(&assembled.geo_line))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Trail::from))
    }

    pub async fn get_trail(&self, id: Uuid) -> Result<Option<Trail>, AppError> {
        let row: Option<TrailRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, coordinates,
                   total_rise, total_fall, eta, length,
                   geo_line, created_at
            FROM trails
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Trail::from))
    }

    pub async fn list_trails(&self, limit: i64, offset: i64) -> Result<Vec<Trail>, AppError> {
        let rows: Vec<TrailRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, coordinates,
                   total_rise, total_fall, eta, length,
                   geo_line, created_at
            FROM trails
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Trail::from).collect())
    }

    pub async fn delete_trail(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trails WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn save_poi(&self, poi: &Poi) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO pois (id, name, description, longitude, latitude, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(poi.id)
        .bind(&poi.name)
        .bind(&poi.description)
        .bind(poi.position.longitude)
        .bind(poi.position.latitude)
        .bind(poi.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_poi(&self, id: Uuid) -> Result<Option<Poi>, AppError> {
        let row: Option<PoiRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, longitude, latitude, created_at
            FROM pois
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Poi::from))
    }

    pub async fn list_pois(&self, limit: i64, offset: i64) -> Result<Vec<Poi>, AppError> {
        let rows: Vec<PoiRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, longitude, latitude, created_at
            FROM pois
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Poi::from).collect())
    }

    pub async fn delete_poi(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pois WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_stats(&self) -> Result<Stats, AppError> {
        let (trail_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trails")
            .fetch_one(&self.pool)
            .await?;
        let (poi_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pois")
            .fetch_one(&self.pool)
            .await?;
        Ok(Stats {
            trail_count,
            poi_count,
        })
    }
}

/// The `pois` table is the production spatial index: its `position`
/// geography column is generated from longitude/latitude and carries a
/// GIST index, so POI writes keep the index in step automatically.
#[async_trait]
impl SpatialIndex for Database {
    async fn insert(&self, poi_id: Uuid, position: Coordinates) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO pois (id, name, description, longitude, latitude, created_at)
            VALUES ($1, '', '', $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE SET longitude = $2, latitude = $3
            "#,
        )
        .bind(poi_id)
        .bind(position.longitude)
        .bind(position.latitude)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, poi_id: Uuid) -> Result<(), AppError> {
        self.delete_poi(poi_id).await?;
        Ok(())
    }

    async fn query_within_radius(
        &self,
        center: Coordinates,
        radius_meters: f64,
    ) -> Result<Vec<PoiDistance>, AppError> {
        let rows: Vec<(Uuid, f64)> = sqlx::query_as(
            r#"
            SELECT id,
                   ST_Distance(position, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography) AS distance_meters
            FROM pois
            WHERE ST_DWithin(position, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3)
            "#,
        )
        .bind(center.longitude)
        .bind(center.latitude)
        .bind(radius_meters)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(poi_id, distance_meters)| PoiDistance {
                poi_id,
                distance_meters,
            })
            .collect())
    }
}
