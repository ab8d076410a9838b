//! Geographic primitives: coordinates and great-circle distance.
//!
//! This module provides:
//!
//! - **GeoPoint**: an immutable latitude/longitude pair in degrees
//! - **distance_km**: Haversine distance on a sphere of radius 6371 km
//!
//! Every distance in the crate (fare quotes, driver matching) goes through
//! [`distance_km`] so that quotes and matches never disagree on geometry.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`.
/// Values outside those ranges are not rejected or normalized; distances
/// computed from them are undefined and callers must validate beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when both components are finite and inside the degree ranges.
    ///
    /// The core never calls this itself; it is offered to callers that want
    /// to reject bad input before quoting or matching.
    pub fn is_within_bounds(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Distance from `self` to `other` in kilometers. See [`distance_km`].
    pub fn distance_km_to(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }
}

/// Great-circle distance between two points in kilometers (Haversine).
///
/// Identical points yield exactly `0.0`: both half-angle sines are zero, so
/// the central angle is `atan2(0, 1) == 0`.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
