//! Seeds a running trail-atlas instance with synthetic trails and POIs.
//!
//! Usage: `API_URL=http://localhost:3001 SEED_TRAILS=20 SEED_POIS=50 cargo run -p test-data --bin seed`

use std::env;

use rand::Rng;
use serde_json::json;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use test_data::{Region, TrailGenerator};

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = env::var("API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());
    let trail_count = env_usize("SEED_TRAILS", 10);
    let poi_count = env_usize("SEED_POIS", 30);
    let seed = env_usize("SEED", 1) as u64;

    let client = reqwest::Client::new();
    let mut generator = TrailGenerator::new(seed);
    let mut rng = rand::thread_rng();
    let region = Region::DOLOMITES;

    for i in 0..trail_count {
        let point_count = rng.gen_range(40..200);
        let points = generator.generate(&region, point_count);
        let coordinates: Vec<_> = points
            .iter()
            .map(|p| {
                json!({
                    "longitude": p.longitude,
                    "latitude": p.latitude,
                    "altitude": p.altitude,
                })
            })
            .collect();

        let response = client
            .post(format!("{api_url}/trails"))
            .json(&json!({
                "name": format!("Synthetic Trail {}", i + 1),
                "description": "Seeded trail",
                "coordinates": coordinates,
            }))
            .send()
            .await?;
        tracing::info!(trail = i + 1, status = %response.status(), "trail seeded");
    }

    for i in 0..poi_count {
        let longitude = rng.gen_range(region.min_longitude..region.max_longitude);
        let latitude = rng.gen_range(region.min_latitude..region.max_latitude);
        let response = client
            .post(format!("{api_url}/pois"))
            .json(&json!({
                "name": format!("Synthetic POI {}", i + 1),
                "description": "Seeded POI",
                "longitude": longitude,
                "latitude": latitude,
            }))
            .send()
            .await?;
        tracing::info!(poi = i + 1, status = %response.status(), "POI seeded");
    }

    Ok(())
}
