//! Fare quoting with time-of-day, supply/demand, and volatility surge.
//!
//! A quote accumulates additive adjustments into a single surge multiplier
//! starting at 1.0, in this order:
//!
//! 1. **Rush hour**: `+0.2` when the local hour falls in 07–09 or 17–19 (inclusive)
//! 2. **Demand**: `+0.3` when requests/drivers > 1.5, `+0.1` when > 1.2,
//!    `+0.5` when there are requests but no drivers
//! 3. **Volatility**: a draw in `[0, 0.2)` from an injected [`VolatilitySource`]
//!
//! Formula: `price = distance_km * BASE_RATE_PER_KM * surge + PLATFORM_FEE`,
//! floored at `MINIMUM_FARE`. Price, distance, and surge are rounded to two
//! decimals in the returned [`FareQuote`].

use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::clock::local_hour;
use crate::error::ConfigError;
use crate::geo::{distance_km, GeoPoint};
use crate::volatility::VolatilitySource;

/// Per-kilometer rate in currency units.
pub const BASE_RATE_PER_KM: f64 = 0.6;

/// Flat platform fee added to every fare.
pub const PLATFORM_FEE: f64 = 0.99;

/// Lowest price a quote can carry.
pub const MINIMUM_FARE: f64 = 5.00;

/// Surge added during rush-hour windows.
pub const RUSH_HOUR_SURCHARGE: f64 = 0.2;

/// Surge added when riders are waiting and no driver is online.
pub const NO_SUPPLY_SURCHARGE: f64 = 0.5;

/// Upper (exclusive) bound of the volatility draw.
pub const MAX_VOLATILITY: f64 = 0.2;

/// Round to two decimal places (currency cents), half away from zero.
///
/// Rounds the exact binary value, so `2.675` (stored as `2.67499…`) gives
/// `2.67`. Non-finite input is returned unchanged.
pub fn round_to_cents(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.mantissa() as f64 / 10f64.powi(cents.scale() as i32)
}

/// Inclusive range of local hours (0–23) that triggers the rush-hour surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RushHourWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl RushHourWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}

/// Surge step applied when the request/driver ratio is strictly above `ratio_above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandTier {
    pub ratio_above: f64,
    pub surcharge: f64,
}

impl DemandTier {
    pub const fn new(ratio_above: f64, surcharge: f64) -> Self {
        Self {
            ratio_above,
            surcharge,
        }
    }
}

/// Pricing parameters. `Default` yields the production constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub base_rate_per_km: f64,
    pub platform_fee: f64,
    pub minimum_fare: f64,
    pub rush_hour_windows: Vec<RushHourWindow>,
    pub rush_hour_surcharge: f64,
    /// Ordered from the highest threshold down; the first tier exceeded wins.
    pub demand_tiers: Vec<DemandTier>,
    pub no_supply_surcharge: f64,
    pub max_volatility: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rate_per_km: BASE_RATE_PER_KM,
            platform_fee: PLATFORM_FEE,
            minimum_fare: MINIMUM_FARE,
            rush_hour_windows: vec![RushHourWindow::new(7, 9), RushHourWindow::new(17, 19)],
            rush_hour_surcharge: RUSH_HOUR_SURCHARGE,
            demand_tiers: vec![DemandTier::new(1.5, 0.3), DemandTier::new(1.2, 0.1)],
            no_supply_surcharge: NO_SUPPLY_SURCHARGE,
            max_volatility: MAX_VOLATILITY,
        }
    }
}

impl PricingConfig {
    pub fn with_base_rate_per_km(mut self, rate: f64) -> Self {
        self.base_rate_per_km = rate;
        self
    }

    pub fn with_platform_fee(mut self, fee: f64) -> Self {
        self.platform_fee = fee;
        self
    }

    pub fn with_minimum_fare(mut self, minimum_fare: f64) -> Self {
        self.minimum_fare = minimum_fare;
        self
    }

    pub fn with_rush_hour_windows(mut self, windows: Vec<RushHourWindow>) -> Self {
        self.rush_hour_windows = windows;
        self
    }

    pub fn with_rush_hour_surcharge(mut self, surcharge: f64) -> Self {
        self.rush_hour_surcharge = surcharge;
        self
    }

    pub fn with_demand_tiers(mut self, tiers: Vec<DemandTier>) -> Self {
        self.demand_tiers = tiers;
        self
    }

    pub fn with_no_supply_surcharge(mut self, surcharge: f64) -> Self {
        self.no_supply_surcharge = surcharge;
        self
    }

    pub fn with_max_volatility(mut self, max_volatility: f64) -> Self {
        self.max_volatility = max_volatility;
        self
    }

    /// Check every parameter. Rates, fees, and surcharges must be finite and
    /// non-negative; the minimum fare must be positive; rush-hour windows must
    /// lie within 0–23 with `start <= end`; demand tiers must have strictly
    /// decreasing positive thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("base_rate_per_km", self.base_rate_per_km)?;
        non_negative("platform_fee", self.platform_fee)?;
        if !self.minimum_fare.is_finite() || self.minimum_fare <= 0.0 {
            return Err(ConfigError::invalid(
                "minimum_fare",
                format!("must be a positive number, got {}", self.minimum_fare),
            ));
        }
        for window in &self.rush_hour_windows {
            if window.start_hour > window.end_hour || window.end_hour > 23 {
                return Err(ConfigError::invalid(
                    "rush_hour_windows",
                    format!(
                        "window {}..={} must satisfy start <= end <= 23",
                        window.start_hour, window.end_hour
                    ),
                ));
            }
        }
        non_negative("rush_hour_surcharge", self.rush_hour_surcharge)?;

        let mut previous: Option<f64> = None;
        for tier in &self.demand_tiers {
            if !tier.ratio_above.is_finite() || tier.ratio_above <= 0.0 {
                return Err(ConfigError::invalid(
                    "demand_tiers",
                    format!("ratio threshold must be positive, got {}", tier.ratio_above),
                ));
            }
            non_negative("demand_tiers", tier.surcharge)?;
            if let Some(prev) = previous {
                if tier.ratio_above >= prev {
                    return Err(ConfigError::invalid(
                        "demand_tiers",
                        "thresholds must be strictly decreasing",
                    ));
                }
            }
            previous = Some(tier.ratio_above);
        }

        non_negative("no_supply_surcharge", self.no_supply_surcharge)?;
        non_negative("max_volatility", self.max_volatility)?;
        Ok(())
    }

    /// Parse from JSON. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be a finite non-negative number, got {value}"),
        ))
    }
}

/// Priced trip, rounded for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    /// Currency units, never below the configured minimum fare.
    pub price: f64,
    pub distance_km: f64,
    /// Dimensionless, at least 1.0 under the default configuration.
    pub surge_multiplier: f64,
}

/// Individual surge adjustments, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurgeBreakdown {
    pub rush_hour: f64,
    pub demand: f64,
    pub volatility: f64,
}

impl SurgeBreakdown {
    /// Multiplier before the volatility term.
    pub fn deterministic(&self) -> f64 {
        1.0 + self.rush_hour + self.demand
    }

    /// Full multiplier, accumulated in the same order the adjustments are applied.
    pub fn total(&self) -> f64 {
        1.0 + self.rush_hour + self.demand + self.volatility
    }
}

/// Computes fare quotes from a [`PricingConfig`]. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    config: PricingConfig,
}

impl FareCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Build from a configuration after validating it.
    pub fn try_new(config: PricingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn rush_hour_adjustment(&self, hour: u32) -> f64 {
        if self
            .config
            .rush_hour_windows
            .iter()
            .any(|window| window.contains(hour))
        {
            self.config.rush_hour_surcharge
        } else {
            0.0
        }
    }

    /// Supply/demand surcharge. No adjustment when requests do not exceed
    /// drivers, including the case where both are zero.
    pub fn demand_adjustment(&self, active_drivers: u32, active_requests: u32) -> f64 {
        if active_drivers > 0 && active_requests > active_drivers {
            let ratio = f64::from(active_requests) / f64::from(active_drivers);
            self.config
                .demand_tiers
                .iter()
                .find(|tier| ratio > tier.ratio_above)
                .map_or(0.0, |tier| tier.surcharge)
        } else if active_drivers == 0 && active_requests > 0 {
            self.config.no_supply_surcharge
        } else {
            0.0
        }
    }

    /// Surge components for one quote. A negative or NaN volatility sample
    /// counts as zero, so the multiplier never drops below 1.0.
    pub fn surge_breakdown<V: VolatilitySource + ?Sized>(
        &self,
        hour: u32,
        active_drivers: u32,
        active_requests: u32,
        volatility: &mut V,
    ) -> SurgeBreakdown {
        SurgeBreakdown {
            rush_hour: self.rush_hour_adjustment(hour),
            demand: self.demand_adjustment(active_drivers, active_requests),
            volatility: volatility.sample(self.config.max_volatility).max(0.0),
        }
    }

    /// Quote a trip from `pickup` to `dropoff` given live supply and demand.
    pub fn quote<Tz, V>(
        &self,
        pickup: GeoPoint,
        dropoff: GeoPoint,
        active_drivers: u32,
        active_requests: u32,
        now: &DateTime<Tz>,
        volatility: &mut V,
    ) -> FareQuote
    where
        Tz: TimeZone,
        V: VolatilitySource + ?Sized,
    {
        let distance_km = distance_km(pickup, dropoff);
        let surge = self
            .surge_breakdown(local_hour(now), active_drivers, active_requests, volatility)
            .total();

        let mut price =
            distance_km * self.config.base_rate_per_km * surge + self.config.platform_fee;
        if price < self.config.minimum_fare {
            price = self.config.minimum_fare;
        }

        let quote = FareQuote {
            price: round_to_cents(price),
            distance_km: round_to_cents(distance_km),
            surge_multiplier: round_to_cents(surge),
        };
        tracing::debug!(
            distance_km = quote.distance_km,
            surge_multiplier = quote.surge_multiplier,
            price = quote.price,
            active_drivers,
            active_requests,
            "fare quoted"
        );
        quote
    }
}

fn default_calculator() -> &'static FareCalculator {
    static CALCULATOR: OnceLock<FareCalculator> = OnceLock::new();
    CALCULATOR.get_or_init(FareCalculator::default)
}

/// Quote a trip with the default pricing configuration.
pub fn quote<Tz, V>(
    pickup: GeoPoint,
    dropoff: GeoPoint,
    active_drivers: u32,
    active_requests: u32,
    now: &DateTime<Tz>,
    volatility: &mut V,
) -> FareQuote
where
    Tz: TimeZone,
    V: VolatilitySource + ?Sized,
{
    default_calculator().quote(pickup, dropoff, active_drivers, active_requests, now, volatility)
}
