//! Parking fee and tariff
//!
//! Fees are kept in minor currency units (cents). Every started minute is
//! billed in full: a one-second stay pays one minute.

use chrono::TimeDelta;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

const NANOS_PER_MINUTE: u128 = 60_000_000_000;

/// Rate that cannot be billed exactly in whole cents
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid rate_per_minute {0}: expected a non-negative amount in whole cents")]
pub struct InvalidRate(pub f64);

/// Amount in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Fee(pub u64);

impl Fee {
    #[inline]
    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Serialized as the two-decimal string, e.g. "1.00"
impl Serialize for Fee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-minute rate and the currency it is quoted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tariff {
    rate_per_minute: Fee,
    currency: String,
}

impl Default for Tariff {
    fn default() -> Self {
        Self { rate_per_minute: Fee(50), currency: "CHF".to_string() }
    }
}

impl Tariff {
    pub fn new(rate_per_minute: Fee, currency: impl Into<String>) -> Self {
        Self { rate_per_minute, currency: currency.into() }
    }

    /// Build from a decimal rate as written in config (0.50 -> 50 cents).
    /// Negative, non-finite and sub-cent rates are rejected.
    pub fn from_decimal_rate(
        rate: f64,
        currency: impl Into<String>,
    ) -> Result<Self, InvalidRate> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(InvalidRate(rate));
        }
        let scaled = rate * 100.0;
        let cents = scaled.round();
        // Tolerates float noise such as 1.2 * 100 = 120.00000000000001
        if (scaled - cents).abs() > 1e-6 || cents > u64::MAX as f64 {
            return Err(InvalidRate(rate));
        }
        Ok(Self::new(Fee(cents as u64), currency))
    }

    #[inline]
    pub fn rate_per_minute(&self) -> Fee {
        self.rate_per_minute
    }

    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Whole minutes billed for a stay, rounding any started minute up.
    /// Negative durations (clock moved backwards) bill zero.
    pub fn billed_minutes(elapsed: TimeDelta) -> u64 {
        let Ok(elapsed) = elapsed.to_std() else {
            return 0;
        };
        elapsed.as_nanos().div_ceil(NANOS_PER_MINUTE) as u64
    }

    /// Minutes billed and the resulting fee
    pub fn charge(&self, elapsed: TimeDelta) -> (u64, Fee) {
        let minutes = Self::billed_minutes(elapsed);
        (minutes, Fee(minutes.saturating_mul(self.rate_per_minute.0)))
    }
}
