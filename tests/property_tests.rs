use climarisk::models::{AirQualityReading, WeatherReading};
use climarisk::risk::{
    RiskConfig, calculate_air_quality_risk_index, calculate_cold_stress_index,
    calculate_complete_risk, calculate_data_confidence, calculate_heat_stress_index, normalize,
};
use climarisk::RiskResult;
use proptest::prelude::*;

fn weather_strategy() -> impl Strategy<Value = WeatherReading> {
    (
        -60.0..60.0f64,
        0.0..100.0f64,
        0.0..150.0f64,
        0.0..15.0f64,
        -70.0..60.0f64,
        0.0..300.0f64,
    )
        .prop_map(
            |(temperature, humidity, wind_speed, uv_index, wind_chill, precipitation)| WeatherReading {
                temperature,
                humidity,
                wind_speed,
                uv_index,
                wind_chill,
                precipitation,
            },
        )
}

fn air_quality_strategy() -> impl Strategy<Value = AirQualityReading> {
    (
        proptest::option::of(0.0..600.0f64),
        proptest::option::of(0.0..800.0f64),
        proptest::option::of(0.0..400.0f64),
        proptest::option::of(0.0..120.0f64),
    )
        .prop_map(|(pm25, pm10, no2, distance)| AirQualityReading {
            pm25,
            pm10,
            no2,
            station: Some("Station".to_string()),
            distance,
        })
}

proptest! {
    #[test]
    fn normalize_is_monotonic(a in -1000.0..1000.0f64, b in -1000.0..1000.0f64, min in -50.0..0.0f64, width in 0.1..100.0f64) {
        let max = min + width;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normalize(low, min, max) <= normalize(high, min, max));
    }

    #[test]
    fn normalize_stays_in_range(v in proptest::num::f64::NORMAL, min in -100.0..100.0f64, max in -100.0..100.0f64) {
        let score = normalize(v, min, max);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn sub_indices_are_bounded(weather in weather_strategy(), anomaly in -10.0..10.0f64, snow in 0.0..100.0f64) {
        prop_assert!(calculate_heat_stress_index(&weather, anomaly) <= 100);
        prop_assert!(calculate_cold_stress_index(&weather, snow) <= 100);
    }

    #[test]
    fn confidence_is_bounded(weather in weather_strategy(), air in air_quality_strategy()) {
        let confidence = calculate_data_confidence(&weather, &air);
        prop_assert!(confidence <= 100);
        prop_assert!(confidence >= 45);
    }

    #[test]
    fn complete_risk_round_trips_through_json(weather in weather_strategy(), air in air_quality_strategy(), anomaly in -3.0..3.0f64) {
        let result = calculate_complete_risk(&weather, &air, anomaly, 0.0, "2024-07-15", &RiskConfig::default());
        prop_assert!(result.aqri <= 100);
        prop_assert!(result.risk_score <= 100);
        prop_assert_eq!(&result.raw.weather, &weather);
        prop_assert_eq!(&result.raw.air_quality, &air);

        let json = serde_json::to_string(&result).unwrap();
        let parsed: RiskResult = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, result);
    }

    #[test]
    fn air_quality_index_ignores_absent_pollutants(pm25 in 0.0..250.0f64) {
        let only_pm25 = AirQualityReading { pm25: Some(pm25), ..Default::default() };
        let expected = normalize(pm25, 0.0, 250.0).round() as u8;
        prop_assert_eq!(calculate_air_quality_risk_index(&only_pm25), expected);
    }
}
