use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ride_core::matching::DriverCandidate;
use ride_core::providers::{DriverCountProvider, OnlineDriverLocationProvider, SupplyDemand};
use ride_core::volatility::VolatilitySource;
use ride_core::ProviderError;

/// Replays a scripted series of counts, repeating the last one.
#[derive(Debug)]
pub struct ScriptedCounts {
    script: Mutex<VecDeque<SupplyDemand>>,
    last: Mutex<SupplyDemand>,
}

impl ScriptedCounts {
    pub fn new(script: impl IntoIterator<Item = SupplyDemand>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(SupplyDemand::default()),
        }
    }
}

impl DriverCountProvider for ScriptedCounts {
    fn counts(&self) -> Result<SupplyDemand, ProviderError> {
        let mut script = self.script.lock().expect("script lock");
        let mut last = self.last.lock().expect("last lock");
        if let Some(next) = script.pop_front() {
            *last = next;
        }
        Ok(*last)
    }
}

/// Fixed driver list that counts how often it was queried.
#[derive(Debug, Default)]
pub struct CountingLocations {
    drivers: Vec<DriverCandidate>,
    calls: AtomicUsize,
}

impl CountingLocations {
    pub fn new(drivers: Vec<DriverCandidate>) -> Self {
        Self {
            drivers,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OnlineDriverLocationProvider for CountingLocations {
    fn online_drivers(&self) -> Result<Vec<DriverCandidate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.drivers.clone())
    }
}

/// Volatility source that yields a fixed sequence, then zeros.
#[derive(Debug, Default)]
pub struct SequenceVolatility {
    values: VecDeque<f64>,
}

impl SequenceVolatility {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl VolatilitySource for SequenceVolatility {
    fn sample(&mut self, _max: f64) -> f64 {
        self.values.pop_front().unwrap_or(0.0)
    }
}
