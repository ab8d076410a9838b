//! Volatility factor sources for surge pricing.
//!
//! The volatility factor stands in for unmodeled real-time conditions such
//! as traffic or weather. It is the only non-deterministic input to a fare
//! quote, so it is drawn from an injected source: seeded for reproducible
//! runs, fixed for tests, or replaced by a real signal.
//!
//! Each quote call borrows its own source mutably. There is no shared global
//! generator, so concurrent callers never interfere with each other's draws.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Trait for drawing the additive volatility term of the surge multiplier.
pub trait VolatilitySource: Send + std::fmt::Debug {
    /// Draw a value in `[0, max)`. Returns `0.0` when `max <= 0`.
    fn sample(&mut self, max: f64) -> f64;
}

/// Uniform draw from a seedable RNG.
#[derive(Debug, Clone)]
pub struct SeededVolatility {
    rng: StdRng,
}

impl SeededVolatility {
    /// Reproducible sequence for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SeededVolatility {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl VolatilitySource for SeededVolatility {
    fn sample(&mut self, max: f64) -> f64 {
        if max.is_nan() || max <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..max)
    }
}

/// Always yields the same value, ignoring `max`.
///
/// Used to pin the volatility term in tests, or to feed an externally
/// measured condition signal in place of the random draw. Pricing treats a
/// negative or NaN value as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedVolatility(pub f64);

impl VolatilitySource for FixedVolatility {
    fn sample(&mut self, _max: f64) -> f64 {
        self.0
    }
}

impl<V: VolatilitySource + ?Sized> VolatilitySource for Box<V> {
    fn sample(&mut self, max: f64) -> f64 {
        (**self).sample(max)
    }
}
