//! Driver selection for a confirmed ride request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{distance_km, GeoPoint};

/// Opaque driver identifier as issued by the account backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub String);

impl DriverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DriverId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DriverId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An online driver and their last reported position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverCandidate {
    pub driver_id: DriverId,
    pub location: GeoPoint,
}

impl DriverCandidate {
    pub fn new(driver_id: impl Into<DriverId>, location: GeoPoint) -> Self {
        Self {
            driver_id: driver_id.into(),
            location,
        }
    }
}

/// The selected driver and their great-circle distance to the pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub driver_id: DriverId,
    pub distance_km: f64,
}

/// Picks a driver for a pickup point from the currently online candidates.
///
/// Returns `None` when no candidate qualifies. An empty candidate set is a
/// normal outcome, not an error.
///
/// Selection does not reserve the driver. Two concurrent requests can pick
/// the same driver; callers that need exactly-once assignment must guard the
/// subsequent write themselves.
pub trait DriverSelector: Send + Sync {
    fn select(&self, pickup: GeoPoint, candidates: &[DriverCandidate]) -> Option<MatchResult>;
}

/// Nearest-driver selection by linear scan.
///
/// # Algorithm Behavior
///
/// 1. Iterates through `candidates` in the supplied order
/// 2. Computes the Haversine distance from the pickup to each candidate
/// 3. Replaces the current best only on a strictly smaller distance, so on
///    exact ties the earliest candidate wins
///
/// Time complexity is O(n). Candidate sets are the drivers currently online,
/// not the whole fleet, so no spatial index is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestDriverSelector;

impl DriverSelector for NearestDriverSelector {
    fn select(&self, pickup: GeoPoint, candidates: &[DriverCandidate]) -> Option<MatchResult> {
        let mut best: Option<(&DriverCandidate, f64)> = None;

        for candidate in candidates {
            let distance = distance_km(pickup, candidate.location);
            match best {
                None => best = Some((candidate, distance)),
                Some((_, best_distance)) if distance < best_distance => {
                    best = Some((candidate, distance))
                }
                _ => {}
            }
        }

        let result = best.map(|(candidate, distance_km)| MatchResult {
            driver_id: candidate.driver_id.clone(),
            distance_km,
        });
        tracing::debug!(
            candidates = candidates.len(),
            driver = result.as_ref().map(|m| m.driver_id.as_str()),
            distance_km = result.as_ref().map(|m| m.distance_km),
            "nearest driver selection"
        );
        result
    }
}

/// Nearest online driver to `pickup`, first-wins on ties.
pub fn select_nearest(pickup: GeoPoint, candidates: &[DriverCandidate]) -> Option<MatchResult> {
    NearestDriverSelector.select(pickup, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PICKUP: GeoPoint = GeoPoint::new(53.3498, -6.2603);

    /// Offset due north by roughly `km` kilometers.
    fn north_of(origin: GeoPoint, km: f64) -> GeoPoint {
        GeoPoint::new(origin.latitude + km / 111.195, origin.longitude)
    }

    #[test]
    fn empty_candidates_yield_no_match() {
        assert_eq!(select_nearest(PICKUP, &[]), None);
    }

    #[test]
    fn single_candidate_is_selected() {
        let location = north_of(PICKUP, 2.0);
        let result = select_nearest(PICKUP, &[DriverCandidate::new("solo", location)])
            .expect("match");
        assert_eq!(result.driver_id, DriverId::new("solo"));
        assert_eq!(result.distance_km, distance_km(PICKUP, location));
    }

    #[test]
    fn selects_closer_driver_regardless_of_order() {
        let far = DriverCandidate::new("far", north_of(PICKUP, 3.0));
        let near = DriverCandidate::new("near", north_of(PICKUP, 1.0));

        let result = select_nearest(PICKUP, &[far.clone(), near.clone()]).expect("match");
        assert_eq!(result.driver_id.as_str(), "near");

        let result = select_nearest(PICKUP, &[near, far]).expect("match");
        assert_eq!(result.driver_id.as_str(), "near");
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let tied = north_of(PICKUP, 1.0);
        let candidates = [
            DriverCandidate::new("d1", north_of(PICKUP, 3.0)),
            DriverCandidate::new("d2", tied),
            DriverCandidate::new("d3", tied),
        ];

        let result = select_nearest(PICKUP, &candidates).expect("match");
        assert_eq!(result.driver_id.as_str(), "d2");
    }

    #[test]
    fn driver_at_pickup_has_zero_distance() {
        let candidates = [
            DriverCandidate::new("away", north_of(PICKUP, 0.5)),
            DriverCandidate::new("here", PICKUP),
        ];
        let result = select_nearest(PICKUP, &candidates).expect("match");
        assert_eq!(result.driver_id.as_str(), "here");
        assert_eq!(result.distance_km, 0.0);
    }
}
