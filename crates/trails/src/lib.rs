pub mod assembler;
pub mod database;
pub mod distance;
pub mod errors;
pub mod eta;
pub mod gpx_import;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod spatial;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    database::Database,
    eta::EtaConfig,
    handlers::{
        create_poi, create_trail, delete_poi, delete_trail, get_poi, get_stats, get_trail,
        get_trail_geo_line, health_check, import_trail, list_pois, list_trails, near_pois,
        update_trail,
    },
};

pub fn create_router(pool: PgPool, eta_config: EtaConfig) -> Router {
    let db = Database::new(pool);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        // Trail routes
        .route("/trails", get(list_trails).post(create_trail))
        .route("/trails/import", post(import_trail))
        .route(
            "/trails/{id}",
            get(get_trail).put(update_trail).delete(delete_trail),
        )
        .route("/trails/{id}/geo-line", get(get_trail_geo_line))
        // POI routes
        .route("/pois", get(list_pois).post(create_poi))
        .route("/pois/near", get(near_pois))
        .route("/pois/{id}", get(get_poi).delete(delete_poi))
        .layer(Extension(db))
        .layer(Extension(eta_config))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

pub async fn run_server(pool: PgPool, eta_config: EtaConfig, port: u16) -> anyhow::Result<()> {
    let app = create_router(pool, eta_config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
