//! Point-of-interest handlers, including proximity search.

use axum::{
    Extension,
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    database::Database,
    errors::AppError,
    models::{Coordinates, Poi},
    spatial::{PoiDistance, ProximityQuery},
};

use super::pagination::PaginationQuery;

/// POI creation request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePoiRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub longitude: f64,
    pub latitude: f64,
}

fn default_page_size() -> i64 {
    super::pagination::DEFAULT_LIMIT
}

/// Proximity search query parameters.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct NearbyPoisQuery {
    pub longitude: f64,
    pub latitude: f64,
    pub radius_meters: f64,
    /// Zero-based page over the distance-ordered result.
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

/// Create a new point of interest.
#[utoipa::path(
    post,
    path = "/pois",
    tag = "pois",
    request_body = CreatePoiRequest,
    responses(
        (status = 200, description = "POI created", body = Poi),
        (status = 400, description = "Invalid coordinates")
    )
)]
pub async fn create_poi(
    Extension(db): Extension<Database>,
    Json(request): Json<CreatePoiRequest>,
) -> Result<Json<Poi>, AppError> {
    let position = Coordinates::new(request.longitude, request.latitude)?;
    let poi = Poi::new(request.name, request.description, position);
    db.save_poi(&poi).await?;

    tracing::info!(poi_id = %poi.id, "POI created");
    Ok(Json(poi))
}

/// List POIs, newest first.
#[utoipa::path(
    get,
    path = "/pois",
    tag = "pois",
    params(PaginationQuery),
    responses(
        (status = 200, description = "POIs", body = Vec<Poi>)
    )
)]
pub async fn list_pois(
    Extension(db): Extension<Database>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<Poi>>, AppError> {
    let pois = db.list_pois(pagination.limit, pagination.offset).await?;
    Ok(Json(pois))
}

/// Get a POI by id.
#[utoipa::path(
    get,
    path = "/pois/{id}",
    tag = "pois",
    params(("id" = Uuid, Path, description = "POI ID")),
    responses(
        (status = 200, description = "POI", body = Poi),
        (status = 404, description = "POI not found")
    )
)]
pub async fn get_poi(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Poi>, AppError> {
    let poi = db.get_poi(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(poi))
}

/// Delete a POI.
#[utoipa::path(
    delete,
    path = "/pois/{id}",
    tag = "pois",
    params(("id" = Uuid, Path, description = "POI ID")),
    responses(
        (status = 204, description = "POI deleted"),
        (status = 404, description = "POI not found")
    )
)]
pub async fn delete_poi(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if db.delete_poi(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// Find POIs within a radius of a point, nearest first.
#[utoipa::path(
    get,
    path = "/pois/near",
    tag = "pois",
    params(NearbyPoisQuery),
    responses(
        (status = 200, description = "POIs within radius, ascending by distance", body = Vec<PoiDistance>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn near_pois(
    Extension(db): Extension<Database>,
    Query(params): Query<NearbyPoisQuery>,
) -> Result<Json<Vec<PoiDistance>>, AppError> {
    let center = Coordinates::new(params.longitude, params.latitude)?;
    let query = ProximityQuery::new(center, params.radius_meters, params.page, params.page_size)?;
    let results = query.run(&db).await?;
    Ok(Json(results))
}
