//! Risk scoring
//!
//! - Engine: sub-indices, aggregate score, data confidence
//! - Config: weights, alert thresholds and confidence penalties
//! - Level: legend bands for a score
//! - Alerts: threshold evaluation and grouping across neighborhoods

pub mod alerts;
pub mod config;
pub mod engine;
pub mod level;

pub use alerts::{Alert, AlertKind, AlertSeverity, AlertSignal, collect_alerts, evaluate_alerts};
pub use config::{ConfidencePenalties, RiskConfig, RiskThresholds, RiskWeights};
pub use engine::{
    AssessmentRequest, RiskEngine, calculate_air_quality_risk_index, calculate_cold_stress_index,
    calculate_complete_risk, calculate_data_confidence, calculate_data_confidence_with,
    calculate_heat_stress_index, calculate_risk_score, normalize,
};
pub use level::RiskLevel;
