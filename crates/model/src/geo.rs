//! Geo — latitude/longitude pair shared by every positioned record.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Ground distance in metres. Equirectangular approximation, accurate
    /// to well under a metre at survey-area scale.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let mean_lat = ((self.latitude + other.latitude) / 2.0).to_radians();
        let dx = (other.longitude - self.longitude).to_radians() * mean_lat.cos();
        let dy = (other.latitude - self.latitude).to_radians();
        (dx * dx + dy * dy).sqrt() * EARTH_RADIUS_M
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let a = Coordinate::new(52.95, -1.15);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // One degree of latitude is roughly 111 km everywhere.
        let a = Coordinate::new(52.0, -1.15);
        let b = Coordinate::new(53.0, -1.15);
        let d = a.distance_to(&b);
        assert!((d - 111_000.0).abs() < 500.0, "unexpected distance: {}", d);
    }

    #[test]
    fn test_serde_field_names() {
        let c = Coordinate::new(1.5, -2.5);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["latitude"], 1.5);
        assert_eq!(json["longitude"], -2.5);
    }
}
