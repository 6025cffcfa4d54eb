//! Integration tests against a real Postgres/PostGIS database.
//!
//! To run these tests, you need:
//! 1. A PostgreSQL database with the PostGIS extension and migrations applied
//! 2. DATABASE_URL environment variable set
//!
//! Run with: `DATABASE_URL=postgres://... cargo test -p trails database`
//!
//! The tests create and clean up their own rows using fresh UUIDs, so they
//! can safely run against a development database.

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use uuid::Uuid;

use trails::assembler::assemble;
use trails::database::Database;
use trails::eta::EtaConfig;
use trails::models::{Coordinates, CoordinatesWithAltitude, Poi, Trail};
use trails::spatial::ProximityQuery;

/// Get database pool, skipping tests if DATABASE_URL is not set.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            None
        }
    }
}

fn point(longitude: f64, latitude: f64, altitude: f64) -> CoordinatesWithAltitude {
    CoordinatesWithAltitude::new(longitude, latitude, altitude).unwrap()
}

fn sample_trail(name: &str) -> Trail {
    let assembled = assemble(
        &[
            point(10.000, 44.000, 100.0),
            point(10.001, 44.000, 150.0),
            point(10.002, 44.000, 120.0),
        ],
        &EtaConfig::default(),
    )
    .unwrap();
    Trail {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        coordinates: assembled.coordinates,
        statistics: assembled.statistics,
        geo_line: assembled.geo_line,
        created_at: time::OffsetDateTime::now_utc(),
    }
}

#[tokio::test]
async fn trail_roundtrip_and_wholesale_replace() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool);

    let trail = sample_trail("db-test trail");
    db.save_trail(&trail).await.unwrap();

    let fetched = db.get_trail(trail.id).await.unwrap().unwrap();
    assert_eq!(fetched.coordinates.len(), 3);
    assert_eq!(fetched.statistics.length, trail.statistics.length);
    assert_eq!(fetched.geo_line.len(), 3);

    // Replace with a longer geometry; statistics must swap together.
    let replacement = assemble(
        &[
            point(10.000, 44.000, 100.0),
            point(10.001, 44.000, 150.0),
            point(10.002, 44.000, 120.0),
            point(10.003, 44.000, 200.0),
        ],
        &EtaConfig::default(),
    )
    .unwrap();
    let updated = db
        .replace_trail(trail.id, "db-test trail v2", "", &replacement)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.coordinates.len(), 4);
    assert_eq!(updated.statistics.length, replacement.statistics.length);
    assert_eq!(updated.name, "db-test trail v2");

    assert!(db.delete_trail(trail.id).await.unwrap());
    assert!(db.get_trail(trail.id).await.unwrap().is_none());
}

#[tokio::test]
async fn replacing_a_missing_trail_returns_none() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool);

    let assembled = assemble(
        &[point(10.000, 44.000, 100.0), point(10.001, 44.000, 150.0)],
        &EtaConfig::default(),
    )
    .unwrap();
    let result = db
        .replace_trail(Uuid::new_v4(), "ghost", "", &assembled)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn postgis_index_answers_proximity_queries() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool);

    // Cluster around an unlikely corner of the ocean to avoid clashing
    // with developer data.
    let base_longitude = -38.73;
    let base_latitude = -14.41;
    let mut ids = Vec::new();
    for i in 0..4u32 {
        let position =
            Coordinates::new(base_longitude + 0.001 * f64::from(i), base_latitude).unwrap();
        let poi = Poi::new(format!("db-test poi {i}"), String::new(), position);
        db.save_poi(&poi).await.unwrap();
        ids.push(poi.id);
    }

    let center = Coordinates::new(base_longitude, base_latitude).unwrap();
    let results = ProximityQuery::new(center, 250.0, 0, 10)
        .unwrap()
        .run(&db)
        .await
        .unwrap();

    // ~0.001 degrees of longitude near latitude -14 is just over 100 m, so
    // the 250 m ball holds the first three points.
    let within: Vec<_> = results
        .iter()
        .filter(|r| ids.contains(&r.poi_id))
        .collect();
    assert_eq!(within.len(), 3);
    for pair in within.windows(2) {
        assert!(pair[0].distance_meters <= pair[1].distance_meters);
    }

    for id in ids {
        db.delete_poi(id).await.unwrap();
    }
}
