//! Data models for the ClimaRisk engine
//!
//! This module contains the value types passed into and out of the engine:
//! - Weather: one weather observation
//! - Air quality: pollutant concentrations, station metadata and AQI estimation
//! - Location: coordinates, distances and polygon centroids
//! - Risk: the indices and the complete risk record

pub mod air_quality;
pub mod location;
pub mod risk;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::{AirQualityReading, PollutantEstimate, estimate_pollutants_from_aqi};
pub use location::{Location, polygon_centroid};
pub use risk::{RawReadings, RiskIndices, RiskResult};
pub use weather::WeatherReading;
