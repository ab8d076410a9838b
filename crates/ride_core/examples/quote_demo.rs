//! Quote a trip, price every vehicle tier, and assign the nearest driver.
//!
//! Run with `cargo run -p ride_core --example quote_demo`. Set `RUST_LOG` to
//! adjust verbosity (defaults to `ride_core=debug`).

use std::sync::Arc;

use ride_core::clock::SystemClock;
use ride_core::matching::DriverCandidate;
use ride_core::providers::{InMemoryDriverLocations, StaticDriverCounts};
use ride_core::volatility::SeededVolatility;
use ride_core::workflow::RideRequestWorkflow;
use ride_core::{GeoPoint, RideResult, VehicleTier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PICKUP: GeoPoint = GeoPoint::new(53.3498, -6.2603);
const DROPOFF: GeoPoint = GeoPoint::new(53.3381, -6.2592);

fn main() -> RideResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ride_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let feed = Arc::new(InMemoryDriverLocations::with_drivers([
        DriverCandidate::new("driver-grafton", GeoPoint::new(53.3419, -6.2600)),
        DriverCandidate::new("driver-docklands", GeoPoint::new(53.3472, -6.2386)),
        DriverCandidate::new("driver-phibsborough", GeoPoint::new(53.3602, -6.2722)),
    ]));
    let workflow = RideRequestWorkflow::new(StaticDriverCounts::new(3, 5), Arc::clone(&feed))
        .with_clock(SystemClock);

    let quote = workflow.quote_trip(PICKUP, DROPOFF, &mut SeededVolatility::from_entropy())?;
    println!(
        "Distance {:.2} km, surge x{:.2}, base price {:.2}",
        quote.distance_km, quote.surge_multiplier, quote.price
    );
    for tier in VehicleTier::ALL {
        println!("  {:<6} {:>7.2}", tier.label(), tier.price_for(&quote));
    }

    let booking = workflow.request_ride(PICKUP, DROPOFF, &quote, VehicleTier::Car);
    match booking.assignment {
        Some(assignment) => println!(
            "Driver {} assigned, {:.2} km from pickup",
            assignment.driver_id, assignment.distance_km
        ),
        None => println!("No driver available, ride is still searching"),
    }
    Ok(())
}
