#![allow(dead_code)]

pub mod providers;

use ride_core::pricing::round_to_cents;
use ride_core::GeoPoint;

/// Price the default formula yields before the floor, rounded to cents.
pub fn expected_price(distance_km: f64, surge: f64) -> f64 {
    round_to_cents((distance_km * 0.6 * surge + 0.99).max(5.0))
}

/// Pickups spread over several continents for property-style checks.
pub fn sample_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(53.3498, -6.2603),
        GeoPoint::new(52.5200, 13.4050),
        GeoPoint::new(-33.8688, 151.2093),
        GeoPoint::new(40.7128, -74.0060),
        GeoPoint::new(35.6762, 139.6503),
        GeoPoint::new(-0.1807, -78.4678),
        GeoPoint::new(64.1466, -21.9426),
        GeoPoint::new(0.0, 179.9),
        GeoPoint::new(0.0, -179.9),
    ]
}
