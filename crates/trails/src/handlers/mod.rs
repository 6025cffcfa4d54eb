//! HTTP request handlers for the trails API.
//!
//! This module re-exports handlers from focused submodules organized by domain.

// Utility submodules
pub mod pagination;

// Handler modules
pub mod pois;
pub mod stats;
pub mod trails;

pub use pois::{
    CreatePoiRequest, NearbyPoisQuery, create_poi, delete_poi, get_poi, list_pois, near_pois,
};
pub use stats::{get_stats, health_check};
pub use trails::{
    ImportTrailQuery, RawTrailCoordinate, SaveTrailRequest, create_trail, delete_trail, get_trail,
    get_trail_geo_line, import_trail, list_trails, update_trail,
};
