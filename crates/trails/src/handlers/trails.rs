//! Trail management handlers.

use axum::{
    Extension,
    extract::{Multipart, Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    assembler,
    database::Database,
    errors::AppError,
    eta::EtaConfig,
    gpx_import,
    models::{Coordinates, CoordinatesWithAltitude, Trail},
};

use super::pagination::PaginationQuery;

/// A raw coordinate record as supplied by a trail create/update request.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct RawTrailCoordinate {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

/// Trail create/replace request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveTrailRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub coordinates: Vec<RawTrailCoordinate>,
}

/// GPX import query parameters.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportTrailQuery {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

fn validated_points(
    raw: &[RawTrailCoordinate],
) -> Result<Vec<CoordinatesWithAltitude>, AppError> {
    raw.iter()
        .map(|c| CoordinatesWithAltitude::new(c.longitude, c.latitude, c.altitude))
        .collect()
}

/// Create a new trail from an ordered coordinate sequence.
#[utoipa::path(
    post,
    path = "/trails",
    tag = "trails",
    request_body = SaveTrailRequest,
    responses(
        (status = 200, description = "Trail created with derived geometry", body = Trail),
        (status = 400, description = "Invalid geometry")
    )
)]
pub async fn create_trail(
    Extension(db): Extension<Database>,
    Extension(eta_config): Extension<EtaConfig>,
    Json(request): Json<SaveTrailRequest>,
) -> Result<Json<Trail>, AppError> {
    let points = validated_points(&request.coordinates)?;
    let assembled = assembler::assemble(&points, &eta_config)?;

    let trail = Trail {
        id: Uuid::new_v4(),
        name: request.name,
        description: request.description,
        coordinates: assembled.coordinates,
        statistics: assembled.statistics,
        geo_line: assembled.geo_line,
        created_at: time::OffsetDateTime::now_utc(),
    };
    db.save_trail(&trail).await?;

    tracing::info!(trail_id = %trail.id, length = trail.statistics.length, "trail created");
    Ok(Json(trail))
}

/// Create a new trail by uploading a GPX file.
#[utoipa::path(
    post,
    path = "/trails/import",
    tag = "trails",
    params(
        ("name" = String, Query, description = "Trail name"),
        ("description" = Option<String>, Query, description = "Trail description")
    ),
    request_body(content_type = "multipart/form-data", description = "GPX file upload"),
    responses(
        (status = 200, description = "Trail imported", body = Trail),
        (status = 400, description = "Invalid GPX or geometry")
    )
)]
pub async fn import_trail(
    Extension(db): Extension<Database>,
    Extension(eta_config): Extension<EtaConfig>,
    Query(params): Query<ImportTrailQuery>,
    mut multipart: Multipart,
) -> Result<Json<Trail>, AppError> {
    let mut content = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart payload: {e}")))?
    {
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {e}")))?;
        content = Some(data);
        break;
    }
    let content =
        content.ok_or_else(|| AppError::InvalidInput("No file in upload".to_string()))?;

    let points = gpx_import::parse_trail_coordinates(&content)?;
    let assembled = assembler::assemble(&points, &eta_config)?;

    let trail = Trail {
        id: Uuid::new_v4(),
        name: params.name,
        description: params.description,
        coordinates: assembled.coordinates,
        statistics: assembled.statistics,
        geo_line: assembled.geo_line,
        created_at: time::OffsetDateTime::now_utc(),
    };
    db.save_trail(&trail).await?;

    tracing::info!(trail_id = %trail.id, points = trail.coordinates.len(), "trail imported from GPX");
    Ok(Json(trail))
}

/// List trails, newest first.
#[utoipa::path(
    get,
    path = "/trails",
    tag = "trails",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Trails", body = Vec<Trail>)
    )
)]
pub async fn list_trails(
    Extension(db): Extension<Database>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Vec<Trail>>, AppError> {
    let trails = db.list_trails(pagination.limit, pagination.offset).await?;
    Ok(Json(trails))
}

/// Get a trail by id.
#[utoipa::path(
    get,
    path = "/trails/{id}",
    tag = "trails",
    params(("id" = Uuid, Path, description = "Trail ID")),
    responses(
        (status = 200, description = "Trail", body = Trail),
        (status = 404, description = "Trail not found")
    )
)]
pub async fn get_trail(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trail>, AppError> {
    let trail = db.get_trail(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(trail))
}

/// Get a trail's simplified line geometry.
#[utoipa::path(
    get,
    path = "/trails/{id}/geo-line",
    tag = "trails",
    params(("id" = Uuid, Path, description = "Trail ID")),
    responses(
        (status = 200, description = "Simplified line", body = Vec<Coordinates>),
        (status = 404, description = "Trail not found")
    )
)]
pub async fn get_trail_geo_line(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Coordinates>>, AppError> {
    let trail = db.get_trail(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(trail.geo_line))
}

/// Replace a trail wholesale: geometry, statistics, and line are
/// recomputed from the submitted coordinates and swapped together.
#[utoipa::path(
    put,
    path = "/trails/{id}",
    tag = "trails",
    params(("id" = Uuid, Path, description = "Trail ID")),
    request_body = SaveTrailRequest,
    responses(
        (status = 200, description = "Updated trail", body = Trail),
        (status = 400, description = "Invalid geometry"),
        (status = 404, description = "Trail not found")
    )
)]
pub async fn update_trail(
    Extension(db): Extension<Database>,
    Extension(eta_config): Extension<EtaConfig>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveTrailRequest>,
) -> Result<Json<Trail>, AppError> {
    let points = validated_points(&request.coordinates)?;
    let assembled = assembler::assemble(&points, &eta_config)?;

    let trail = db
        .replace_trail(id, &request.name, &request.description, &assembled)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(trail_id = %id, "trail geometry replaced");
    Ok(Json(trail))
}

/// Delete a trail.
#[utoipa::path(
    delete,
    path = "/trails/{id}",
    tag = "trails",
    params(("id" = Uuid, Path, description = "Trail ID")),
    responses(
        (status = 204, description = "Trail deleted"),
        (status = 404, description = "Trail not found")
    )
)]
pub async fn delete_trail(
    Extension(db): Extension<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if db.delete_trail(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
