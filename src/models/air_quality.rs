//! Air-quality reading and AQI-based pollutant estimation

use serde::{Deserialize, Serialize};

use crate::RiskError;
use crate::models::Location;

/// One already-parsed air-quality observation.
///
/// `None` means the provider had no data for that pollutant. It is not
/// the same as a measured zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReading {
    /// PM2.5 concentration in µg/m³
    pub pm25: Option<f64>,
    /// PM10 concentration in µg/m³
    pub pm10: Option<f64>,
    /// NO₂ concentration in µg/m³
    pub no2: Option<f64>,
    /// Label of the reporting station
    pub station: Option<String>,
    /// Distance in km from the station to the point of interest
    pub distance: Option<f64>,
}

/// Pollutant concentrations estimated from a composite AQI value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantEstimate {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
}

impl AirQualityReading {
    /// Reading with every pollutant estimated from a composite AQI.
    #[must_use]
    pub fn from_aqi(aqi: f64, station: Option<String>) -> Self {
        let estimate = estimate_pollutants_from_aqi(aqi);
        Self {
            pm25: Some(estimate.pm25),
            pm10: Some(estimate.pm10),
            no2: Some(estimate.no2),
            station,
            distance: None,
        }
    }

    /// Fill only the absent pollutants with AQI-derived estimates.
    #[must_use]
    pub fn fill_missing_from_aqi(&self, aqi: f64) -> Self {
        if self.present_count() == 3 {
            return self.clone();
        }

        let estimate = estimate_pollutants_from_aqi(aqi);
        Self {
            pm25: self.pm25.or(Some(estimate.pm25)),
            pm10: self.pm10.or(Some(estimate.pm10)),
            no2: self.no2.or(Some(estimate.no2)),
            station: self.station.clone(),
            distance: self.distance,
        }
    }

    /// Set `distance` to the great-circle distance between station and point.
    #[must_use]
    pub fn with_station_distance(mut self, point: &Location, station: &Location) -> Self {
        self.distance = Some(point.distance_km(station));
        self
    }

    /// True when none of the three pollutants has data
    #[must_use]
    pub fn all_absent(&self) -> bool {
        self.present_count() == 0
    }

    /// Number of pollutants with data (0-3)
    #[must_use]
    pub fn present_count(&self) -> usize {
        [self.pm25, self.pm10, self.no2]
            .iter()
            .filter(|value| value.is_some())
            .count()
    }

    /// Reject non-finite or negative concentrations and distances.
    pub fn validate(&self) -> crate::Result<()> {
        let fields = [
            ("pm25", self.pm25),
            ("pm10", self.pm10),
            ("no2", self.no2),
            ("distance", self.distance),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(RiskError::validation(format!(
                        "airQuality.{name} must be a non-negative finite number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Estimate PM2.5, PM10 and NO₂ from a US AQI value using EPA breakpoint
/// segments. Each value is rounded to one decimal.
#[must_use]
pub fn estimate_pollutants_from_aqi(aqi: f64) -> PollutantEstimate {
    let (pm25, pm10, no2) = match aqi {
        a if a <= 50.0 => (a * 0.5, a * 0.54, a * 0.5),
        a if a <= 100.0 => (
            12.1 + (a - 51.0) * 0.77,
            55.0 + (a - 51.0) * 0.9,
            54.0 + (a - 51.0) * 0.92,
        ),
        a if a <= 150.0 => (
            35.5 + (a - 101.0) * 0.29,
            155.0 + (a - 101.0) * 0.9,
            101.0 + (a - 101.0) * 0.98,
        ),
        a if a <= 200.0 => (
            55.5 + (a - 151.0) * 0.29,
            255.0 + (a - 151.0) * 0.9,
            361.0 + (a - 151.0) * 2.78,
        ),
        a if a <= 300.0 => (
            150.5 + (a - 201.0) * 0.5,
            355.0 + (a - 201.0) * 0.9,
            650.0 + (a - 201.0) * 3.03,
        ),
        a => (
            250.5 + (a - 301.0) * 1.25,
            425.0 + (a - 301.0) * 0.38,
            1250.0 + (a - 301.0) * 1.26,
        ),
    };

    PollutantEstimate {
        pm25: round_one_decimal(pm25),
        pm10: round_one_decimal(pm10),
        no2: round_one_decimal(no2),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(50.0, 25.0, 27.0, 25.0)]
    #[case(51.0, 12.1, 55.0, 54.0)]
    #[case(101.0, 35.5, 155.0, 101.0)]
    #[case(301.0, 250.5, 425.0, 1250.0)]
    fn test_estimate_pollutants_from_aqi(
        #[case] aqi: f64,
        #[case] pm25: f64,
        #[case] pm10: f64,
        #[case] no2: f64,
    ) {
        let estimate = estimate_pollutants_from_aqi(aqi);
        assert_eq!(estimate.pm25, pm25);
        assert_eq!(estimate.pm10, pm10);
        assert_eq!(estimate.no2, no2);
    }

    #[test]
    fn test_from_aqi_has_all_pollutants() {
        let reading = AirQualityReading::from_aqi(42.0, Some("WAQI Station".to_string()));
        assert_eq!(reading.present_count(), 3);
        assert_eq!(reading.station.as_deref(), Some("WAQI Station"));
        assert!(reading.distance.is_none());
    }

    #[test]
    fn test_fill_missing_keeps_measured_values() {
        let reading = AirQualityReading {
            pm25: Some(8.0),
            pm10: None,
            no2: None,
            station: Some("OpenMeteo Station".to_string()),
            distance: None,
        };

        let filled = reading.fill_missing_from_aqi(50.0);
        assert_eq!(filled.pm25, Some(8.0));
        assert_eq!(filled.pm10, Some(27.0));
        assert_eq!(filled.no2, Some(25.0));
        assert_eq!(filled.station, reading.station);
    }

    #[test]
    fn test_zero_is_present_not_absent() {
        let reading = AirQualityReading {
            pm25: Some(0.0),
            ..Default::default()
        };
        assert_eq!(reading.present_count(), 1);
        assert!(!reading.all_absent());
        assert!(AirQualityReading::default().all_absent());
    }

    #[test]
    fn test_with_station_distance() {
        let point = Location::new(43.6532, -79.3832, "Downtown".to_string());
        let reading = AirQualityReading::default().with_station_distance(&point, &point);
        assert_eq!(reading.distance, Some(0.0));
    }

    #[test]
    fn test_validate_rejects_negative_concentration() {
        let reading = AirQualityReading {
            no2: Some(-1.0),
            ..Default::default()
        };
        let err = reading.validate().unwrap_err();
        assert!(err.to_string().contains("airQuality.no2"));
    }

    #[test]
    fn test_absent_values_serialize_as_null() {
        let json = serde_json::to_value(AirQualityReading::default()).unwrap();
        assert!(json["pm25"].is_null());
        assert!(json["station"].is_null());
        assert!(json["distance"].is_null());
    }
}
