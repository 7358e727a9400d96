//! Threshold alerts derived from risk records
//!
//! The score computation never looks at thresholds. This module is where
//! they are applied: each sub-index at or above its threshold produces a
//! signal, and signals for several neighborhoods are grouped into alerts
//! ready for an external alert store (which assigns identifiers).

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use super::config::RiskThresholds;
use crate::models::RiskResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Heat,
    Cold,
    AirQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Moderate,
    High,
    Extreme,
}

/// One sub-index over its threshold for one risk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSignal {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub value: u8,
    pub threshold: u8,
}

/// Grouped alert covering every neighborhood with the same kind and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub neighborhoods: Vec<String>,
    pub message: String,
    pub timestamp: String,
}

impl AlertKind {
    fn index_name(self) -> &'static str {
        match self {
            AlertKind::Heat => "HSI",
            AlertKind::Cold => "CSI",
            AlertKind::AirQuality => "AQRI",
        }
    }
}

impl AlertSeverity {
    /// Severity grows with how far the index sits above its threshold.
    #[must_use]
    pub fn from_excess(excess: u8) -> Self {
        match excess {
            0..=4 => AlertSeverity::Low,
            5..=14 => AlertSeverity::Moderate,
            15..=24 => AlertSeverity::High,
            _ => AlertSeverity::Extreme,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Heat => write!(f, "heat stress"),
            AlertKind::Cold => write!(f, "cold stress"),
            AlertKind::AirQuality => write!(f, "air quality"),
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "Low"),
            AlertSeverity::Moderate => write!(f, "Moderate"),
            AlertSeverity::High => write!(f, "High"),
            AlertSeverity::Extreme => write!(f, "Extreme"),
        }
    }
}

/// Signals for every sub-index of `result` at or above its threshold,
/// in heat, cold, air-quality order.
#[must_use]
pub fn evaluate_alerts(result: &RiskResult, thresholds: &RiskThresholds) -> Vec<AlertSignal> {
    [
        (AlertKind::Heat, result.hsi, thresholds.hsi),
        (AlertKind::Cold, result.csi, thresholds.csi),
        (AlertKind::AirQuality, result.aqri, thresholds.aqri),
    ]
    .into_iter()
    .filter(|&(_, value, threshold)| value >= threshold)
    .map(|(kind, value, threshold)| AlertSignal {
        kind,
        severity: AlertSeverity::from_excess(value - threshold),
        value,
        threshold,
    })
    .collect()
}

struct AlertGroup {
    neighborhoods: Vec<String>,
    peak: u8,
    threshold: u8,
    timestamp: String,
}

/// Group the signals of several neighborhoods into alerts.
///
/// Alerts come out ordered by kind, then by descending severity. The
/// timestamp is the `date` of the first neighborhood in each group.
#[must_use]
pub fn collect_alerts(results: &[(String, RiskResult)], thresholds: &RiskThresholds) -> Vec<Alert> {
    let mut groups: BTreeMap<(AlertKind, Reverse<AlertSeverity>), AlertGroup> = BTreeMap::new();

    for (neighborhood, result) in results {
        for signal in evaluate_alerts(result, thresholds) {
            let group = groups
                .entry((signal.kind, Reverse(signal.severity)))
                .or_insert_with(|| AlertGroup {
                    neighborhoods: Vec::new(),
                    peak: signal.value,
                    threshold: signal.threshold,
                    timestamp: result.date.clone(),
                });
            group.neighborhoods.push(neighborhood.clone());
            group.peak = group.peak.max(signal.value);
        }
    }

    groups
        .into_iter()
        .map(|((kind, Reverse(severity)), group)| Alert {
            kind,
            severity,
            message: format!(
                "{severity} {kind} risk in {}: {} up to {} (threshold {}).",
                group.neighborhoods.join(", "),
                kind.index_name(),
                group.peak,
                group.threshold
            ),
            neighborhoods: group.neighborhoods,
            timestamp: group.timestamp,
        })
        .collect()
}
