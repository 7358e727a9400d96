//! Risk-level bands for the 0-100 scale

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five bands, one per legend tick at 0, 25, 50, 75 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    /// Band whose legend tick is nearest to `score`. Scores above 100
    /// saturate to `Extreme`.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match (f64::from(score.min(100)) / 25.0).round() as u8 {
            0 => RiskLevel::Low,
            1 => RiskLevel::Moderate,
            2 => RiskLevel::Medium,
            3 => RiskLevel::High,
            _ => RiskLevel::Extreme,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Extreme => "extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Extreme => write!(f, "Extreme"),
        }
    }
}
