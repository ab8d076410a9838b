//! Interfaces to the live data the pricing and matching core consumes.
//!
//! The hosted backend owns driver presence, ride requests, and location
//! feeds. These traits are the narrow seam through which the workflow reads
//! them; the in-memory implementations back demos and tests.

use std::sync::{Arc, RwLock};

use crate::error::ProviderError;
use crate::matching::{DriverCandidate, DriverId};

/// Live supply and demand at the moment of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupplyDemand {
    /// Drivers currently online.
    pub active_drivers: u32,
    /// Ride requests still searching for a driver.
    pub active_requests: u32,
}

impl SupplyDemand {
    pub const fn new(active_drivers: u32, active_requests: u32) -> Self {
        Self {
            active_drivers,
            active_requests,
        }
    }
}

/// Counts of online drivers and searching ride requests.
pub trait DriverCountProvider: Send + Sync {
    fn counts(&self) -> Result<SupplyDemand, ProviderError>;
}

/// Current positions of all online drivers.
pub trait OnlineDriverLocationProvider: Send + Sync {
    fn online_drivers(&self) -> Result<Vec<DriverCandidate>, ProviderError>;
}

impl<T: DriverCountProvider + ?Sized> DriverCountProvider for Arc<T> {
    fn counts(&self) -> Result<SupplyDemand, ProviderError> {
        (**self).counts()
    }
}

impl<T: OnlineDriverLocationProvider + ?Sized> OnlineDriverLocationProvider for Arc<T> {
    fn online_drivers(&self) -> Result<Vec<DriverCandidate>, ProviderError> {
        (**self).online_drivers()
    }
}

/// Fixed counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDriverCounts(pub SupplyDemand);

impl StaticDriverCounts {
    pub const fn new(active_drivers: u32, active_requests: u32) -> Self {
        Self(SupplyDemand::new(active_drivers, active_requests))
    }
}

impl DriverCountProvider for StaticDriverCounts {
    fn counts(&self) -> Result<SupplyDemand, ProviderError> {
        Ok(self.0)
    }
}

/// Location feed held in memory. One entry per driver, kept in the order
/// drivers first came online.
#[derive(Debug, Default)]
pub struct InMemoryDriverLocations {
    drivers: RwLock<Vec<DriverCandidate>>,
}

impl InMemoryDriverLocations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drivers(drivers: impl IntoIterator<Item = DriverCandidate>) -> Self {
        let feed = Self::new();
        for driver in drivers {
            feed.upsert(driver);
        }
        feed
    }

    /// Insert a driver, or move an existing driver to a new location in place.
    pub fn upsert(&self, candidate: DriverCandidate) {
        let mut drivers = self
            .drivers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match drivers
            .iter_mut()
            .find(|existing| existing.driver_id == candidate.driver_id)
        {
            Some(existing) => existing.location = candidate.location,
            None => drivers.push(candidate),
        }
    }

    /// Take a driver offline. Returns `false` if they were not listed.
    pub fn remove(&self, driver_id: &DriverId) -> bool {
        let mut drivers = self
            .drivers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = drivers.len();
        drivers.retain(|existing| &existing.driver_id != driver_id);
        drivers.len() != before
    }

    pub fn len(&self) -> usize {
        self.drivers
            .read()
            .map(|drivers| drivers.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OnlineDriverLocationProvider for InMemoryDriverLocations {
    fn online_drivers(&self) -> Result<Vec<DriverCandidate>, ProviderError> {
        self.drivers
            .read()
            .map(|drivers| drivers.clone())
            .map_err(|_| ProviderError::Unavailable("driver location feed lock poisoned".into()))
    }
}
