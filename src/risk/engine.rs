//! Climate-health risk engine
//!
//! Turns one weather reading and one air-quality reading into heat stress
//! (HSI), cold stress (CSI) and air-quality risk (AQRI) sub-indices, a
//! bounded aggregate risk score and a data confidence value. Every
//! function here is pure: same inputs, same output, no shared state.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{ConfidencePenalties, RiskConfig};
use crate::RiskError;
use crate::models::{AirQualityReading, RawReadings, RiskIndices, RiskResult, WeatherReading};

// HSI component weights. Fixed by design, not read from `RiskConfig`.
const HSI_TEMPERATURE_WEIGHT: f64 = 0.5;
const HSI_HUMIDITY_WEIGHT: f64 = 0.3;
const HSI_ANOMALY_WEIGHT: f64 = 0.2;

const CSI_MIN_TEMP_WEIGHT: f64 = 0.6;
const CSI_WIND_CHILL_WEIGHT: f64 = 0.3;
const CSI_SNOW_WEIGHT: f64 = 0.1;
/// Comfortable baseline the wind chill is measured against
const CSI_COMFORT_BASELINE_C: f64 = 20.0;

const PM25_WEIGHT: f64 = 0.5;
const PM10_WEIGHT: f64 = 0.3;
const NO2_WEIGHT: f64 = 0.2;

const TEMPERATURE_STRESS_SHARE: f64 = 0.85;
const AIR_QUALITY_SHARE: f64 = 0.15;

/// Linear rescale of `value` from `[min, max]` onto `[0, 100]`, saturating
/// outside the range. A zero-width range yields 0.
#[must_use]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    let normalized = ((value - min) / (max - min)) * 100.0;
    normalized.clamp(0.0, 100.0)
}

fn to_index(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Heat stress from temperature, humidity and a temperature anomaly z-score.
///
/// Pass `0.0` as `temp_anomaly` when no historical baseline is available.
#[must_use]
pub fn calculate_heat_stress_index(weather: &WeatherReading, temp_anomaly: f64) -> u8 {
    let temp_score = normalize(weather.temperature, 0.0, 45.0);
    let humidity_score = normalize(weather.humidity, 0.0, 100.0);
    let anomaly_score = normalize(temp_anomaly, -3.0, 3.0);

    to_index(
        temp_score * HSI_TEMPERATURE_WEIGHT
            + humidity_score * HSI_HUMIDITY_WEIGHT
            + anomaly_score * HSI_ANOMALY_WEIGHT,
    )
}

/// Cold stress from wind chill and a caller-normalized snow cover score.
///
/// Wind chill stands in for the daily minimum temperature: the first
/// component is the distance of the wind chill from a 20 °C baseline.
/// `snow_cover_score` is expected in [0, 100] and used as is.
#[must_use]
pub fn calculate_cold_stress_index(weather: &WeatherReading, snow_cover_score: f64) -> u8 {
    let min_temp_score = normalize((weather.wind_chill - CSI_COMFORT_BASELINE_C).abs(), 0.0, 40.0);
    let wind_chill_score = normalize(weather.wind_chill.abs(), 0.0, 20.0);
    let snow_score = snow_cover_score;

    to_index(
        min_temp_score * CSI_MIN_TEMP_WEIGHT
            + wind_chill_score * CSI_WIND_CHILL_WEIGHT
            + snow_score * CSI_SNOW_WEIGHT,
    )
}

/// Air-quality risk from PM2.5, PM10 and NO₂.
///
/// Absent pollutants drop out and the remaining weights are rescaled to
/// sum to 1. With no pollutant data at all the index is 0, which cannot
/// be told apart from "no risk".
#[must_use]
pub fn calculate_air_quality_risk_index(air_quality: &AirQualityReading) -> u8 {
    if air_quality.all_absent() {
        return 0;
    }

    let components = [
        (air_quality.pm25, 250.0, PM25_WEIGHT),
        (air_quality.pm10, 350.0, PM10_WEIGHT),
        (air_quality.no2, 200.0, NO2_WEIGHT),
    ];

    // (score, weight) with absent pollutants contributing zero to both
    let scored = components.map(|(value, max, weight)| match value {
        Some(v) => (normalize(v, 0.0, max), weight),
        None => (0.0, 0.0),
    });

    let total_weight: f64 = scored.iter().map(|&(_, weight)| weight).sum();
    if total_weight == 0.0 {
        return 0;
    }

    // Rescale each weight before summing; dividing the weighted sum instead
    // rounds differently at .5 boundaries.
    let aqri = scored
        .iter()
        .fold(0.0, |sum, &(score, weight)| sum + score * (weight / total_weight));

    to_index(aqri)
}

/// Aggregate score: the worse of heat and cold stress carries 85 %, AQRI 15 %.
///
/// Taking the maximum keeps a strong signal in one temperature direction
/// from being averaged away by a calm reading in the other.
#[must_use]
pub fn calculate_risk_score(indices: &RiskIndices) -> u8 {
    let temp_stress = indices.hsi.max(indices.csi);
    to_index(
        f64::from(temp_stress) * TEMPERATURE_STRESS_SHARE
            + f64::from(indices.aqri) * AIR_QUALITY_SHARE,
    )
}

/// Data confidence with the default penalty table.
#[must_use]
pub fn calculate_data_confidence(weather: &WeatherReading, air_quality: &AirQualityReading) -> u8 {
    calculate_data_confidence_with(weather, air_quality, &ConfidencePenalties::default())
}

/// Data confidence: 100 minus penalties for missing pollutants and for a
/// distant reporting station, floored at 0.
#[must_use]
pub fn calculate_data_confidence_with(
    _weather: &WeatherReading,
    air_quality: &AirQualityReading,
    penalties: &ConfidencePenalties,
) -> u8 {
    let mut confidence: i32 = 100;

    if air_quality.all_absent() {
        confidence -= i32::from(penalties.missing_all_pollutants);
    } else {
        let missing = 3 - air_quality.present_count() as i32;
        confidence -= missing * i32::from(penalties.missing_pollutant);
    }

    if let Some(distance) = air_quality.distance {
        if distance > penalties.very_far_station_km {
            confidence -= i32::from(penalties.very_far_station_penalty);
        } else if distance > penalties.far_station_km {
            confidence -= i32::from(penalties.far_station_penalty);
        }
    }

    confidence.clamp(0, 100) as u8
}

/// Compute every index for one place and date and assemble the risk record.
///
/// `config` is accepted for contract compatibility; none of its fields
/// change the numbers produced here. `date` is copied verbatim.
#[must_use]
pub fn calculate_complete_risk(
    weather: &WeatherReading,
    air_quality: &AirQualityReading,
    temp_anomaly: f64,
    snow_cover_score: f64,
    date: &str,
    _config: &RiskConfig,
) -> RiskResult {
    assemble(
        weather,
        air_quality,
        temp_anomaly,
        snow_cover_score,
        date,
        &ConfidencePenalties::default(),
    )
}

fn assemble(
    weather: &WeatherReading,
    air_quality: &AirQualityReading,
    temp_anomaly: f64,
    snow_cover_score: f64,
    date: &str,
    penalties: &ConfidencePenalties,
) -> RiskResult {
    let indices = RiskIndices {
        hsi: calculate_heat_stress_index(weather, temp_anomaly),
        csi: calculate_cold_stress_index(weather, snow_cover_score),
        aqri: calculate_air_quality_risk_index(air_quality),
    };
    let risk_score = calculate_risk_score(&indices);
    let confidence = calculate_data_confidence_with(weather, air_quality, penalties);

    RiskResult {
        hsi: indices.hsi,
        csi: indices.csi,
        aqri: indices.aqri,
        risk_score,
        raw: RawReadings {
            weather: *weather,
            air_quality: air_quality.clone(),
        },
        confidence,
        date: date.to_string(),
    }
}

/// One scoring request as received from a transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub weather: WeatherReading,
    pub air_quality: AirQualityReading,
    /// Temperature anomaly z-score, 0 without a baseline
    #[serde(default)]
    pub temp_anomaly: f64,
    /// Snow cover pre-normalized to [0, 100]
    #[serde(default)]
    pub snow_cover_score: f64,
    /// ISO-8601 date or timestamp the readings represent
    pub date: String,
    /// Overrides the engine's configuration for this request
    #[serde(default)]
    pub config: Option<RiskConfig>,
}

impl AssessmentRequest {
    /// Check the caller contract: finite numbers, non-negative
    /// concentrations and an ISO-8601 date.
    pub fn validate(&self) -> crate::Result<()> {
        self.weather.validate()?;
        self.air_quality.validate()?;

        if !self.temp_anomaly.is_finite() {
            return Err(RiskError::validation("tempAnomaly must be a finite number"));
        }
        if !self.snow_cover_score.is_finite() {
            return Err(RiskError::validation("snowCoverScore must be a finite number"));
        }

        validate_iso_date(&self.date)?;

        if let Some(config) = &self.config {
            config.validate()?;
        }
        Ok(())
    }
}

fn validate_iso_date(date: &str) -> crate::Result<()> {
    let is_timestamp = DateTime::parse_from_rfc3339(date).is_ok();
    let is_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok();

    if is_timestamp || is_date {
        Ok(())
    } else {
        Err(RiskError::validation(format!(
            "date must be an ISO-8601 date or timestamp, got '{date}'"
        )))
    }
}

/// Scoring entry point carrying the configuration used for every request.
///
/// Stateless apart from its configuration; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
    penalties: ConfidencePenalties,
}

impl RiskEngine {
    #[must_use]
    pub fn new(config: RiskConfig, penalties: ConfidencePenalties) -> Self {
        Self { config, penalties }
    }

    #[must_use]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    #[must_use]
    pub fn penalties(&self) -> &ConfidencePenalties {
        &self.penalties
    }

    /// Configuration in effect for a request: its override, else the engine's.
    #[must_use]
    pub fn effective_config(&self, request: &AssessmentRequest) -> RiskConfig {
        request.config.unwrap_or(self.config)
    }

    /// Validate a request and score it.
    #[tracing::instrument(name = "assess", level = "debug", skip(self, request), fields(date = %request.date))]
    pub fn assess(&self, request: &AssessmentRequest) -> crate::Result<RiskResult> {
        request.validate()?;

        let result = self.score(
            &request.weather,
            &request.air_quality,
            request.temp_anomaly,
            request.snow_cover_score,
            &request.date,
        );

        debug!(
            hsi = result.hsi,
            csi = result.csi,
            aqri = result.aqri,
            risk_score = result.risk_score,
            confidence = result.confidence,
            "Risk assessed"
        );
        Ok(result)
    }

    /// Score readings without validation, using this engine's penalties.
    #[must_use]
    pub fn score(
        &self,
        weather: &WeatherReading,
        air_quality: &AirQualityReading,
        temp_anomaly: f64,
        snow_cover_score: f64,
        date: &str,
    ) -> RiskResult {
        assemble(
            weather,
            air_quality,
            temp_anomaly,
            snow_cover_score,
            date,
            &self.penalties,
        )
    }
}
