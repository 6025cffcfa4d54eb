//! Hiking-pace model coefficients for ETA estimation.

use std::env;

/// Naismith-style pace coefficients. Built once at startup and shared
/// read-only; the profile analyzer takes it as an explicit argument so
/// the computation stays pure.
#[derive(Debug, Clone, Copy)]
pub struct EtaConfig {
    /// Minutes to cover one kilometer on flat ground.
    pub base_pace_minutes_per_km: f64,
    /// Extra minutes per meter of ascent.
    pub ascent_penalty_minutes_per_meter: f64,
    /// Extra minutes per meter of descent.
    pub descent_penalty_minutes_per_meter: f64,
}

impl Default for EtaConfig {
    fn default() -> Self {
        Self {
            base_pace_minutes_per_km: 12.0,
            ascent_penalty_minutes_per_meter: 0.1,
            descent_penalty_minutes_per_meter: 0.025,
        }
    }
}

impl EtaConfig {
    /// Reads coefficients from the environment, falling back to the
    /// Naismith-style defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_pace_minutes_per_km: env_f64(
                "ETA_BASE_PACE_MIN_PER_KM",
                defaults.base_pace_minutes_per_km,
            ),
            ascent_penalty_minutes_per_meter: env_f64(
                "ETA_ASCENT_PENALTY_MIN_PER_M",
                defaults.ascent_penalty_minutes_per_meter,
            ),
            descent_penalty_minutes_per_meter: env_f64(
                "ETA_DESCENT_PENALTY_MIN_PER_M",
                defaults.descent_penalty_minutes_per_meter,
            ),
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_naismith_like() {
        let config = EtaConfig::default();
        assert_eq!(config.base_pace_minutes_per_km, 12.0);
        assert_eq!(config.ascent_penalty_minutes_per_meter, 0.1);
        assert_eq!(config.descent_penalty_minutes_per_meter, 0.025);
    }
}
