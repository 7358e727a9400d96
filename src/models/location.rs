//! Location model and the geographic helpers used to relate sensors to places

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (neighborhood, station, etc.)
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
        }
    }

    /// Great-circle distance to another location in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Location) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}

/// Centroid of a polygon given as GeoJSON rings of `[lon, lat]` pairs.
///
/// Plain vertex average over every ring, holes included. Positions with
/// fewer than two coordinates are skipped.
#[must_use]
pub fn polygon_centroid(rings: &[Vec<Vec<f64>>], name: &str) -> Option<Location> {
    let mut sum_lat = 0.0;
    let mut sum_lon = 0.0;
    let mut count = 0usize;

    for ring in rings {
        for position in ring {
            if let [lon, lat, ..] = position.as_slice() {
                sum_lon += lon;
                sum_lat += lat;
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    Some(Location::new(sum_lat / n, sum_lon / n, name.to_string()))
}
