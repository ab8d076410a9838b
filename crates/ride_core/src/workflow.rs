//! Ride request workflow: quote, choose a tier, request, assign a driver.
//!
//! The workflow wires the pure core to its live inputs. It reads supply and
//! demand from a [`DriverCountProvider`], the time from a [`Clock`], and
//! online driver positions from an [`OnlineDriverLocationProvider`]. It
//! produces [`RideRequest`] records but does not persist them; writing the
//! record and its status changes belongs to the caller.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::RideResult;
use crate::geo::GeoPoint;
use crate::matching::{DriverId, DriverSelector, MatchResult, NearestDriverSelector};
use crate::pricing::{FareCalculator, FareQuote, PricingConfig};
use crate::providers::{DriverCountProvider, OnlineDriverLocationProvider};
use crate::tiers::VehicleTier;
use crate::volatility::VolatilitySource;

/// Driver count used for pricing when fewer drivers are reported online.
pub const DEFAULT_MIN_REPORTED_DRIVERS: u32 = 1;

/// Workflow tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Floor applied to the online driver count before quoting. With the
    /// default of 1 the no-supply surcharge never applies; the demand ratio
    /// is computed against a single driver instead.
    pub min_reported_drivers: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            min_reported_drivers: DEFAULT_MIN_REPORTED_DRIVERS,
        }
    }
}

/// Lifecycle of a ride request record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    /// Waiting for a driver.
    Searching,
    /// A driver has been assigned.
    Accepted,
    Completed,
}

/// A ride request as handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    /// Final price for the chosen tier.
    pub price: f64,
    pub distance_km: f64,
    pub vehicle_tier: VehicleTier,
    pub status: RideStatus,
    pub driver_id: Option<DriverId>,
}

impl RideRequest {
    /// New searching request priced for `tier`.
    pub fn new(pickup: GeoPoint, dropoff: GeoPoint, quote: &FareQuote, tier: VehicleTier) -> Self {
        Self {
            pickup,
            dropoff,
            price: tier.price_for(quote),
            distance_km: quote.distance_km,
            vehicle_tier: tier,
            status: RideStatus::Searching,
            driver_id: None,
        }
    }
}

/// Outcome of [`RideRequestWorkflow::request_ride`].
#[derive(Debug, Clone, PartialEq)]
pub struct RideBooking {
    pub ride: RideRequest,
    /// `None` when no online driver was available; the ride stays searching.
    pub assignment: Option<MatchResult>,
}

/// Orchestrates pricing and matching against live providers.
pub struct RideRequestWorkflow {
    calculator: FareCalculator,
    config: WorkflowConfig,
    counts: Box<dyn DriverCountProvider>,
    locations: Box<dyn OnlineDriverLocationProvider>,
    clock: Box<dyn Clock>,
    selector: Box<dyn DriverSelector>,
}

impl RideRequestWorkflow {
    /// Workflow with default pricing, the system clock, and nearest-driver selection.
    pub fn new(
        counts: impl DriverCountProvider + 'static,
        locations: impl OnlineDriverLocationProvider + 'static,
    ) -> Self {
        Self {
            calculator: FareCalculator::default(),
            config: WorkflowConfig::default(),
            counts: Box::new(counts),
            locations: Box::new(locations),
            clock: Box::new(SystemClock),
            selector: Box::new(NearestDriverSelector),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_selector(mut self, selector: impl DriverSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_calculator(mut self, calculator: FareCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Replace the pricing configuration after validating it.
    pub fn with_pricing_config(mut self, config: PricingConfig) -> RideResult<Self> {
        self.calculator = FareCalculator::try_new(config)?;
        Ok(self)
    }

    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn calculator(&self) -> &FareCalculator {
        &self.calculator
    }

    /// Quote a trip using the live counts and the current time.
    ///
    /// `volatility` belongs to this call only, so concurrent quotes never
    /// share a generator.
    pub fn quote_trip<V: VolatilitySource + ?Sized>(
        &self,
        pickup: GeoPoint,
        dropoff: GeoPoint,
        volatility: &mut V,
    ) -> RideResult<FareQuote> {
        let counts = self.counts.counts().inspect_err(|error| {
            tracing::warn!(%error, "driver counts unavailable, cannot quote");
        })?;
        let active_drivers = counts.active_drivers.max(self.config.min_reported_drivers);
        let now = self.clock.now();

        let quote = self.calculator.quote(
            pickup,
            dropoff,
            active_drivers,
            counts.active_requests,
            &now,
            volatility,
        );
        tracing::info!(
            price = quote.price,
            distance_km = quote.distance_km,
            surge_multiplier = quote.surge_multiplier,
            reported_drivers = counts.active_drivers,
            active_requests = counts.active_requests,
            "trip quoted"
        );
        Ok(quote)
    }

    /// Create a searching ride for `tier` and try to assign the nearest driver.
    ///
    /// A failing location feed does not fail the request: the ride is
    /// returned still searching, as when no driver is online.
    pub fn request_ride(
        &self,
        pickup: GeoPoint,
        dropoff: GeoPoint,
        quote: &FareQuote,
        tier: VehicleTier,
    ) -> RideBooking {
        let mut ride = RideRequest::new(pickup, dropoff, quote, tier);
        let assignment = match self.assign_driver(&mut ride) {
            Ok(assignment) => assignment,
            Err(error) => {
                tracing::warn!(%error, "driver assignment failed, ride left searching");
                None
            }
        };
        RideBooking { ride, assignment }
    }

    /// Assign the nearest online driver to a searching ride.
    ///
    /// On a match the ride becomes [`RideStatus::Accepted`] with the driver
    /// recorded. Rides that are not searching are left untouched.
    pub fn assign_driver(&self, ride: &mut RideRequest) -> RideResult<Option<MatchResult>> {
        if ride.status != RideStatus::Searching {
            tracing::debug!(status = ?ride.status, "ride is not searching, skipping assignment");
            return Ok(None);
        }

        let candidates = self.locations.online_drivers()?;
        let Some(assignment) = self.selector.select(ride.pickup, &candidates) else {
            tracing::warn!(online = candidates.len(), "no online driver available");
            return Ok(None);
        };

        ride.driver_id = Some(assignment.driver_id.clone());
        ride.status = RideStatus::Accepted;
        tracing::info!(
            driver = %assignment.driver_id,
            distance_km = assignment.distance_km,
            tier = %ride.vehicle_tier,
            "driver assigned"
        );
        Ok(Some(assignment))
    }
}
