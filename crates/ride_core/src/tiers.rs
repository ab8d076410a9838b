//! Vehicle tiers offered after a fare quote.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseTierError;
use crate::pricing::{round_to_cents, FareQuote};

/// Closed set of vehicle classes a rider can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleTier {
    #[default]
    Bike,
    Car,
    Truck,
}

impl VehicleTier {
    /// All tiers in display order.
    pub const ALL: [VehicleTier; 3] = [VehicleTier::Bike, VehicleTier::Car, VehicleTier::Truck];

    pub fn id(self) -> &'static str {
        match self {
            VehicleTier::Bike => "bike",
            VehicleTier::Car => "car",
            VehicleTier::Truck => "truck",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleTier::Bike => "Bike",
            VehicleTier::Car => "Car",
            VehicleTier::Truck => "Truck",
        }
    }

    pub fn price_multiplier(self) -> f64 {
        match self {
            VehicleTier::Bike => 1.0,
            VehicleTier::Car => 1.35,
            VehicleTier::Truck => 2.0,
        }
    }

    /// Final price for this tier: the quoted price scaled and rounded to cents.
    pub fn price_for(self, quote: &FareQuote) -> f64 {
        round_to_cents(quote.price * self.price_multiplier())
    }
}

impl fmt::Display for VehicleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        VehicleTier::ALL
            .into_iter()
            .find(|tier| tier.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseTierError(s.to_string()))
    }
}
