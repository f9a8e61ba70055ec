use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Geographic position in degrees. Every distance in the game goes
/// through [`GeoPoint::distance_to`] so feedback bands are consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance to `other`, in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let to_rad = |deg: f64| deg * PI / 180.0;

        let dlat = to_rad(other.lat - self.lat);
        let dlon = to_rad(other.lon - self.lon);

        let a = (dlat / 2.0).sin().powi(2)
            + to_rad(self.lat).cos() * to_rad(other.lat).cos() * (dlon / 2.0).sin().powi(2);

        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_METERS * c
    }
}

#[cfg(test)]
mod tests {
    use super::GeoPoint;

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(-30.0331, -51.2300);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn porto_alegre_to_caxias_do_sul_is_about_95km() {
        let poa = GeoPoint::new(-30.0331, -51.2300);
        let caxias = GeoPoint::new(-29.1678, -51.1794);
        let d = poa.distance_to(&caxias);
        assert!((90_000.0..101_000.0).contains(&d), "expected ~96km, got {d}m");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111km() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = a.distance_to(&b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}m");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(-29.7, -53.0);
        let b = GeoPoint::new(-31.3, -54.1);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }
}
