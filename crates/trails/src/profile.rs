//! Elevation profile analysis: total rise/fall, ETA, and length.

use crate::{
    errors::AppError,
    eta::EtaConfig,
    models::{TrailCoordinates, TrailStatistics},
};

/// Derives aggregate statistics from an accumulated coordinate sequence.
///
/// Takes the distance accumulator's output rather than raw points so the
/// reported length and the per-point distances come from one computation
/// and cannot diverge.
pub fn analyze(
    points: &[TrailCoordinates],
    eta_config: &EtaConfig,
) -> Result<TrailStatistics, AppError> {
    if points.len() < 2 {
        return Err(AppError::InvalidGeometry(format!(
            "an elevation profile needs at least 2 coordinates, got {}",
            points.len()
        )));
    }

    let mut total_rise = 0.0;
    let mut total_fall = 0.0;
    for pair in points.windows(2) {
        let delta = pair[1].altitude - pair[0].altitude;
        if delta > 0.0 {
            total_rise += delta;
        } else {
            total_fall += delta.abs();
        }
    }

    let length = points
        .last()
        .map(|p| p.distance_from_trail_start)
        .unwrap_or(0.0);

    let eta = (length / 1000.0) * eta_config.base_pace_minutes_per_km
        + total_rise * eta_config.ascent_penalty_minutes_per_meter
        + total_fall * eta_config.descent_penalty_minutes_per_meter;

    Ok(TrailStatistics {
        total_rise,
        total_fall,
        eta,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::accumulate;
    use crate::models::CoordinatesWithAltitude;

    fn accumulated(raw: &[(f64, f64, f64)]) -> Vec<TrailCoordinates> {
        let points: Vec<CoordinatesWithAltitude> = raw
            .iter()
            .map(|&(lon, lat, alt)| CoordinatesWithAltitude::new(lon, lat, alt).unwrap())
            .collect();
        accumulate(&points).unwrap()
    }

    #[test]
    fn test_single_point_has_no_profile() {
        let points = accumulated(&[(10.0, 44.0, 100.0)]);
        assert!(matches!(
            analyze(&points, &EtaConfig::default()),
            Err(AppError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_rise_and_fall_sum_positive_and_negative_deltas() {
        let points = accumulated(&[
            (10.000, 44.000, 100.0),
            (10.001, 44.000, 150.0),
            (10.002, 44.000, 120.0),
        ]);
        let stats = analyze(&points, &EtaConfig::default()).unwrap();
        assert!((stats.total_rise - 50.0).abs() < 1e-9);
        assert!((stats.total_fall - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_net_altitude_change_equals_rise_minus_fall() {
        let points = accumulated(&[
            (10.000, 44.000, 320.0),
            (10.001, 44.001, 580.0),
            (10.002, 44.001, 410.0),
            (10.003, 44.002, 695.0),
            (10.004, 44.003, 150.0),
        ]);
        let stats = analyze(&points, &EtaConfig::default()).unwrap();
        let net = points.last().unwrap().altitude - points.first().unwrap().altitude;
        assert!((stats.total_rise - stats.total_fall - net).abs() < 1e-9);
        assert!(stats.total_rise >= 0.0);
        assert!(stats.total_fall >= 0.0);
    }

    #[test]
    fn test_length_is_last_accumulated_distance() {
        let points = accumulated(&[
            (10.000, 44.000, 100.0),
            (10.001, 44.000, 150.0),
            (10.002, 44.000, 120.0),
        ]);
        let stats = analyze(&points, &EtaConfig::default()).unwrap();
        assert_eq!(stats.length, points.last().unwrap().distance_from_trail_start);
        // Roughly 160 m of ground track for the worked example.
        assert!((stats.length - 160.0).abs() < 1.0, "length = {}", stats.length);
    }

    #[test]
    fn test_eta_uses_supplied_coefficients() {
        let points = accumulated(&[
            (10.000, 44.000, 100.0),
            (10.001, 44.000, 150.0),
            (10.002, 44.000, 120.0),
        ]);
        let config = EtaConfig {
            base_pace_minutes_per_km: 10.0,
            ascent_penalty_minutes_per_meter: 0.2,
            descent_penalty_minutes_per_meter: 0.1,
        };
        let stats = analyze(&points, &config).unwrap();
        let expected = (stats.length / 1000.0) * 10.0 + 50.0 * 0.2 + 30.0 * 0.1;
        assert!((stats.eta - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reversal_swaps_rise_and_fall() {
        let raw = [
            (10.000, 44.000, 100.0),
            (10.001, 44.001, 260.0),
            (10.002, 44.001, 180.0),
            (10.003, 44.002, 240.0),
        ];
        let mut reversed = raw;
        reversed.reverse();

        let fwd = analyze(&accumulated(&raw), &EtaConfig::default()).unwrap();
        let bwd = analyze(&accumulated(&reversed), &EtaConfig::default()).unwrap();

        assert!((fwd.total_rise - bwd.total_fall).abs() < 1e-9);
        assert!((fwd.total_fall - bwd.total_rise).abs() < 1e-9);
        assert!((fwd.length - bwd.length).abs() < 1e-9);
    }
}
