//! Risk record produced by the engine

use serde::{Deserialize, Serialize};

use super::{AirQualityReading, WeatherReading};
use crate::risk::RiskLevel;

/// The three sub-indices, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskIndices {
    /// Heat stress index
    pub hsi: u8,
    /// Cold stress index
    pub csi: u8,
    /// Air quality risk index
    pub aqri: u8,
}

/// Inputs retained verbatim for audit and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReadings {
    pub weather: WeatherReading,
    pub air_quality: AirQualityReading,
}

/// Complete risk assessment for one place and one date.
///
/// Serialized field names and nesting (`riskScore`, `raw.weather`,
/// `raw.airQuality`) are a compatibility contract with existing consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub hsi: u8,
    pub csi: u8,
    pub aqri: u8,
    pub risk_score: u8,
    pub raw: RawReadings,
    /// Data completeness and spatial relevance (0-100)
    pub confidence: u8,
    /// ISO-8601 timestamp supplied by the caller, stored as given
    pub date: String,
}

impl RiskResult {
    #[must_use]
    pub fn indices(&self) -> RiskIndices {
        RiskIndices {
            hsi: self.hsi,
            csi: self.csi,
            aqri: self.aqri,
        }
    }

    /// Legend band for the aggregate score
    #[must_use]
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}
