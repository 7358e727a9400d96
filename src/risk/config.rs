//! Scoring configuration: weights, alert thresholds and confidence penalties

use serde::{Deserialize, Serialize};

use crate::RiskError;

/// Relative importance of heat, cold and air contributions.
///
/// Reserved. The aggregate score uses a fixed 0.85/0.15 split of the
/// dominant temperature stress and AQRI and never reads these values.
/// They stay in the contract so existing configurations keep parsing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub heat: f64,
    pub cold: f64,
    pub air: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            heat: 0.4,
            cold: 0.3,
            air: 0.3,
        }
    }
}

/// Per-index alerting thresholds, consumed by [`crate::risk::alerts`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub hsi: u8,
    pub csi: u8,
    pub aqri: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            hsi: 70,
            csi: 60,
            aqri: 65,
        }
    }
}

/// Caller-supplied scoring configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub weights: RiskWeights,
    pub thresholds: RiskThresholds,
}

impl RiskConfig {
    /// Weights must be finite and non-negative, thresholds within [0, 100].
    pub fn validate(&self) -> crate::Result<()> {
        let weights = [
            ("heat", self.weights.heat),
            ("cold", self.weights.cold),
            ("air", self.weights.air),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RiskError::config(format!(
                    "Weight '{name}' must be a non-negative finite number, got {weight}"
                )));
            }
        }

        let thresholds = [
            ("hsi", self.thresholds.hsi),
            ("csi", self.thresholds.csi),
            ("aqri", self.thresholds.aqri),
        ];
        for (name, threshold) in thresholds {
            if threshold > 100 {
                return Err(RiskError::config(format!(
                    "Threshold '{name}' cannot exceed 100, got {threshold}"
                )));
            }
        }

        Ok(())
    }
}

/// Deductions applied by the data confidence calculation.
///
/// Distance tiers are checked farthest first, so a station beyond
/// `very_far_station_km` takes only `very_far_station_penalty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePenalties {
    /// Deducted once when no pollutant has data
    pub missing_all_pollutants: u8,
    /// Deducted per absent pollutant when at least one is present
    pub missing_pollutant: u8,
    pub far_station_km: f64,
    pub far_station_penalty: u8,
    pub very_far_station_km: f64,
    pub very_far_station_penalty: u8,
}

impl Default for ConfidencePenalties {
    fn default() -> Self {
        Self {
            missing_all_pollutants: 30,
            missing_pollutant: 10,
            far_station_km: 25.0,
            far_station_penalty: 15,
            very_far_station_km: 50.0,
            very_far_station_penalty: 25,
        }
    }
}

impl ConfidencePenalties {
    /// Flat -15 for any station beyond 25 km, with no separate tier above
    /// 50 km. Matches scores produced by earlier deployments.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            very_far_station_penalty: 15,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        let penalties = [
            ("missing_all_pollutants", self.missing_all_pollutants),
            ("missing_pollutant", self.missing_pollutant),
            ("far_station_penalty", self.far_station_penalty),
            ("very_far_station_penalty", self.very_far_station_penalty),
        ];
        for (name, penalty) in penalties {
            if penalty > 100 {
                return Err(RiskError::config(format!(
                    "Confidence penalty '{name}' cannot exceed 100, got {penalty}"
                )));
            }
        }

        if !self.far_station_km.is_finite() || self.far_station_km <= 0.0 {
            return Err(RiskError::config(
                "far_station_km must be a positive finite distance",
            ));
        }
        if !self.very_far_station_km.is_finite() || self.very_far_station_km < self.far_station_km {
            return Err(RiskError::config(
                "very_far_station_km must be finite and not below far_station_km",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();
        assert_eq!(config.weights.heat, 0.4);
        assert_eq!(config.weights.cold, 0.3);
        assert_eq!(config.weights.air, 0.3);
        assert_eq!(config.thresholds, RiskThresholds { hsi: 70, csi: 60, aqri: 65 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RiskConfig = serde_json::from_str(r#"{"thresholds": {"hsi": 80}}"#).unwrap();
        assert_eq!(config.thresholds.hsi, 80);
        assert_eq!(config.thresholds.csi, 60);
        assert_eq!(config.weights, RiskWeights::default());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = RiskConfig::default();
        config.weights.air = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Weight 'air'"));
    }

    #[test]
    fn test_threshold_above_100_rejected() {
        let mut config = RiskConfig::default();
        config.thresholds.csi = 120;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_legacy_penalties() {
        let legacy = ConfidencePenalties::legacy();
        assert_eq!(legacy.very_far_station_penalty, legacy.far_station_penalty);
        assert!(legacy.validate().is_ok());
    }

    #[test]
    fn test_unordered_distance_tiers_rejected() {
        let penalties = ConfidencePenalties {
            very_far_station_km: 10.0,
            ..ConfidencePenalties::default()
        };
        assert!(penalties.validate().is_err());
    }
}
