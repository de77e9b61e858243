//! Loan inputs and their sources
//!
//! Values are layered: JSON config file, then `MORTGAGE_*` environment
//! variables, then command-line flags. Anything still missing is left for
//! the caller to prompt for.

use crate::error::{MortgageError, Result};
use crate::mortgage::AmortizationEngine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_PRINCIPAL: &str = "MORTGAGE_PRINCIPAL";
pub const ENV_RATE: &str = "MORTGAGE_RATE";
pub const ENV_AMORTIZATION_YEARS: &str = "MORTGAGE_AMORTIZATION_YEARS";
pub const ENV_TERM_YEARS: &str = "MORTGAGE_TERM_YEARS";

/// Fully specified loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    /// Amount borrowed
    pub principal: f64,
    /// Quoted annual rate in percent, compounded semi-annually (5.0 for 5%)
    pub quoted_rate: f64,
    /// Years to fully repay the loan
    pub amortization_years: u32,
    /// Years covered by the generated schedules
    pub term_years: f64,
}

impl LoanConfig {
    pub fn engine(&self) -> AmortizationEngine {
        AmortizationEngine::new(self.quoted_rate, self.amortization_years)
    }
}

/// Loan inputs where any field may still be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialLoanConfig {
    pub principal: Option<f64>,
    pub quoted_rate: Option<f64>,
    pub amortization_years: Option<u32>,
    pub term_years: Option<f64>,
}

impl PartialLoanConfig {
    /// Load from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MortgageError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read the `MORTGAGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read variables through `lookup`; unset variables stay `None`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| -> Option<String> {
            lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };

        Ok(Self {
            principal: read(ENV_PRINCIPAL).map(|v| parse_field(ENV_PRINCIPAL, &v)).transpose()?,
            quoted_rate: read(ENV_RATE).map(|v| parse_field(ENV_RATE, &v)).transpose()?,
            amortization_years: read(ENV_AMORTIZATION_YEARS)
                .map(|v| parse_field(ENV_AMORTIZATION_YEARS, &v))
                .transpose()?,
            term_years: read(ENV_TERM_YEARS).map(|v| parse_field(ENV_TERM_YEARS, &v)).transpose()?,
        })
    }

    /// Fields set in `other` replace fields set here
    pub fn merge(self, other: PartialLoanConfig) -> Self {
        Self {
            principal: other.principal.or(self.principal),
            quoted_rate: other.quoted_rate.or(self.quoted_rate),
            amortization_years: other.amortization_years.or(self.amortization_years),
            term_years: other.term_years.or(self.term_years),
        }
    }

    /// Names of fields that are still unset
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.principal.is_none() {
            missing.push("principal");
        }
        if self.quoted_rate.is_none() {
            missing.push("quoted_rate");
        }
        if self.amortization_years.is_none() {
            missing.push("amortization_years");
        }
        if self.term_years.is_none() {
            missing.push("term_years");
        }
        missing
    }

    /// Convert into a complete config
    ///
    /// A zero amortization horizon is rejected since no level payment can
    /// retire a loan in zero periods.
    pub fn resolve(&self) -> Result<LoanConfig> {
        if self.amortization_years == Some(0) {
            return Err(MortgageError::InvalidInput {
                field: "amortization_years",
                value: "0".to_string(),
            });
        }

        match (self.principal, self.quoted_rate, self.amortization_years, self.term_years) {
            (Some(principal), Some(quoted_rate), Some(amortization_years), Some(term_years)) => Ok(LoanConfig {
                principal,
                quoted_rate,
                amortization_years,
                term_years,
            }),
            _ => Err(MortgageError::Config(format!("missing {}", self.missing().join(", ")))),
        }
    }
}

/// Parse one user-supplied value, naming the field on failure
pub fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| MortgageError::InvalidInput {
        field,
        value: value.to_string(),
    })
}
