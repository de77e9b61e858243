//! Quoted-rate conversion
//!
//! Mortgage rates are quoted as a nominal annual rate compounded
//! semi-annually. Every payment cadence gets its own effective per-period
//! rate that grows to the same half-year amount.

use super::frequency::Frequency;
use serde::{Deserialize, Serialize};

/// Quoted rate and amortization horizon shared by every computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSpec {
    /// Nominal annual rate as a decimal (0.05 for 5%)
    nominal_rate: f64,
    /// Amortization horizon in whole years
    amortization_years: u32,
}

impl RateSpec {
    /// Build from a quoted percentage (5.0 for 5%)
    ///
    /// `amortization_years` must be at least 1; a zero horizon makes every
    /// annuity payment infinite. `PartialLoanConfig::resolve` rejects it.
    pub fn from_percent(quoted_rate_pct: f64, amortization_years: u32) -> Self {
        Self {
            nominal_rate: quoted_rate_pct / 100.0,
            amortization_years,
        }
    }

    pub fn nominal_rate(&self) -> f64 {
        self.nominal_rate
    }

    pub fn amortization_years(&self) -> u32 {
        self.amortization_years
    }

    /// Effective rate for one half-year
    pub fn semi_annual_rate(&self) -> f64 {
        self.nominal_rate / 2.0
    }

    /// Effective annual rate implied by semi-annual compounding
    pub fn effective_annual_rate(&self) -> f64 {
        (1.0 + self.semi_annual_rate()).powi(2) - 1.0
    }

    /// Effective rate for one payment period of `frequency`
    ///
    /// `(1 + j/2)^(1/k) - 1` where k is the number of periods per half-year.
    /// Rapid cadences share the rate of their regular counterpart.
    pub fn period_rate(&self, frequency: Frequency) -> f64 {
        let k = frequency.periods_per_half_year() as f64;
        (1.0 + self.semi_annual_rate()).powf(1.0 / k) - 1.0
    }

    /// Number of periods over the full amortization horizon, saturating at
    /// `u32::MAX`
    pub fn amortization_periods(&self, frequency: Frequency) -> u32 {
        self.amortization_years.saturating_mul(frequency.periods_per_year())
    }
}
