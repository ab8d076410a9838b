//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures so unit tests, integration tests, and benchmarks reuse the
//! same geography and the same pinned time and volatility.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::clock::FixedClock;
use crate::geo::GeoPoint;
use crate::matching::DriverCandidate;

/// Pickup point used across tests (O'Connell Street, Dublin).
pub const TEST_PICKUP: GeoPoint = GeoPoint::new(53.3498, -6.2603);

/// Dropoff roughly 1.43 km from [`TEST_PICKUP`]; always floored to the minimum fare.
pub const TEST_SHORT_DROPOFF: GeoPoint = GeoPoint::new(53.3599, -6.2470);

/// Dropoff roughly 10 km due north of [`TEST_PICKUP`]; priced above the minimum fare.
pub const TEST_LONG_DROPOFF: GeoPoint = GeoPoint::new(53.4398, -6.2603);

/// Kilometers per degree of latitude on the 6371 km sphere.
const KM_PER_DEGREE_LAT: f64 = 111.194_926_644_558_73;

/// A point `km` kilometers due north of `origin`.
pub fn point_north_of(origin: GeoPoint, km: f64) -> GeoPoint {
    GeoPoint::new(origin.latitude + km / KM_PER_DEGREE_LAT, origin.longitude)
}

/// A driver candidate `km` kilometers due north of [`TEST_PICKUP`].
pub fn candidate_at_km(id: &str, km: f64) -> DriverCandidate {
    DriverCandidate::new(id, point_north_of(TEST_PICKUP, km))
}

/// 2024-05-14 at `hour`:30 in the given UTC offset (hours east).
///
/// # Panics
///
/// Panics if `hour` is not a valid hour of day or the offset is out of range.
pub fn local_time_at(hour: u32, utc_offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(utc_offset_hours * 3600)
        .expect("offset within ±24h")
        .with_ymd_and_hms(2024, 5, 14, hour, 30, 0)
        .single()
        .expect("hour must be 0-23")
}

/// A clock pinned to `hour`:30 UTC.
pub fn clock_at_hour(hour: u32) -> FixedClock {
    FixedClock::new(local_time_at(hour, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{local_hour, Clock};
    use crate::geo::distance_km;

    #[test]
    fn point_north_of_matches_requested_distance() {
        let point = point_north_of(TEST_PICKUP, 3.0);
        assert!((distance_km(TEST_PICKUP, point) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn clock_reports_requested_hour() {
        assert_eq!(local_hour(&clock_at_hour(18).now()), 18);
        assert_eq!(local_hour(&local_time_at(8, 2)), 8);
    }

    #[test]
    fn fixture_dropoffs_straddle_the_minimum_fare() {
        assert!(distance_km(TEST_PICKUP, TEST_SHORT_DROPOFF) < 5.0);
        assert!(distance_km(TEST_PICKUP, TEST_LONG_DROPOFF) > 9.0);
    }
}
