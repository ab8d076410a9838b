//! Fare quoting and nearest-driver matching for a ride-hailing service.
//!
//! Distance, pricing, and matching are pure functions over their inputs.
//! Time and the volatility draw are injected so quotes are reproducible in
//! tests. Live counts and driver locations arrive through the traits in
//! [`providers`]; persistence of ride records stays with the caller.

pub mod clock;
pub mod error;
pub mod geo;
pub mod matching;
pub mod pricing;
pub mod providers;
pub mod tiers;
pub mod volatility;
pub mod workflow;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{ConfigError, ParseTierError, ProviderError, RideError, RideResult};
pub use geo::{distance_km, GeoPoint};
pub use matching::{select_nearest, DriverCandidate, DriverId, MatchResult};
pub use pricing::{quote, FareCalculator, FareQuote, PricingConfig};
pub use tiers::VehicleTier;
