//! `ClimaRisk` - climate-health risk scoring
//!
//! This library converts weather and air-quality readings into heat
//! stress, cold stress and air-quality sub-indices, a single bounded risk
//! score and a data confidence value.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod risk;

// Re-export core types for public API
pub use config::ClimaRiskConfig;
pub use error::RiskError;
pub use models::{AirQualityReading, Location, RiskIndices, RiskResult, WeatherReading};
pub use risk::{AssessmentRequest, ConfidencePenalties, RiskConfig, RiskEngine, RiskLevel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RiskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_engine_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RiskEngine>();
        assert_send_sync::<RiskResult>();
    }
}
