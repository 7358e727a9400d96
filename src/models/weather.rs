//! Weather reading consumed by the risk engine

use serde::{Deserialize, Serialize};

use crate::RiskError;

/// One already-parsed weather observation for a point of interest.
///
/// The engine does not range-check these values; normalization clamps
/// anything outside the typical range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// UV index (unitless, >= 0)
    pub uv_index: f64,
    /// Wind chill (feels-like) temperature in Celsius
    pub wind_chill: f64,
    /// Precipitation amount in mm
    pub precipitation: f64,
}

impl WeatherReading {
    /// Reject non-finite values. Finite but implausible values pass.
    pub fn validate(&self) -> crate::Result<()> {
        let fields = [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("windSpeed", self.wind_speed),
            ("uvIndex", self.uv_index),
            ("windChill", self.wind_chill),
            ("precipitation", self.precipitation),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(RiskError::validation(format!(
                    "weather.{name} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
