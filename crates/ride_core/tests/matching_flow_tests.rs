mod support;

use ride_core::geo::distance_km;
use ride_core::matching::{DriverCandidate, DriverSelector, NearestDriverSelector};
use ride_core::select_nearest;
use ride_core::test_helpers::{candidate_at_km, TEST_PICKUP};

use support::sample_points;

#[test]
fn empty_candidate_set_is_no_match() {
    assert!(select_nearest(TEST_PICKUP, &[]).is_none());
}

#[test]
fn first_of_tied_nearest_wins() {
    let candidates = [
        candidate_at_km("d1", 3.0),
        candidate_at_km("d2", 1.0),
        candidate_at_km("d3", 1.0),
    ];

    let result = select_nearest(TEST_PICKUP, &candidates).expect("match");
    assert_eq!(result.driver_id.as_str(), "d2");
    assert!((result.distance_km - 1.0).abs() < 1e-6);
}

#[test]
fn reported_distance_uses_the_shared_distance_function() {
    for pickup in sample_points() {
        let candidates: Vec<DriverCandidate> = sample_points()
            .into_iter()
            .enumerate()
            .map(|(i, location)| DriverCandidate::new(format!("driver-{i}"), location))
            .collect();

        let result = select_nearest(pickup, &candidates).expect("match");
        let chosen = candidates
            .iter()
            .find(|c| c.driver_id == result.driver_id)
            .expect("chosen candidate is from the input");
        assert_eq!(result.distance_km, distance_km(pickup, chosen.location));
        for candidate in &candidates {
            assert!(result.distance_km <= distance_km(pickup, candidate.location));
        }
    }
}

#[test]
fn antimeridian_neighbor_is_nearest() {
    let pickup = ride_core::GeoPoint::new(0.0, 179.9);
    let candidates = [
        DriverCandidate::new("same-side-far", ride_core::GeoPoint::new(0.0, 179.0)),
        DriverCandidate::new("across-date-line", ride_core::GeoPoint::new(0.0, -179.9)),
    ];

    let result = select_nearest(pickup, &candidates).expect("match");
    assert_eq!(result.driver_id.as_str(), "across-date-line");
}

#[test]
fn selector_trait_object_matches_free_function() {
    let selector: Box<dyn DriverSelector> = Box::new(NearestDriverSelector);
    let candidates: Vec<_> = (1..=20)
        .rev()
        .map(|km| candidate_at_km(&format!("d{km}"), f64::from(km) * 0.25))
        .collect();

    let via_trait = selector.select(TEST_PICKUP, &candidates);
    let via_fn = select_nearest(TEST_PICKUP, &candidates);
    assert_eq!(via_trait, via_fn);
    assert_eq!(via_fn.expect("match").driver_id.as_str(), "d1");
}

#[test]
fn distance_is_symmetric_across_sample_points() {
    let points = sample_points();
    for a in &points {
        assert_eq!(distance_km(*a, *a), 0.0);
        for b in &points {
            assert!((distance_km(*a, *b) - distance_km(*b, *a)).abs() < 1e-9);
        }
    }
}
