//! Payment frequencies and their period conventions

use crate::error::MortgageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment cadence for a mortgage
///
/// Declaration order is the fixed reporting order used for payment sets,
/// schedule sets and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "Monthly")]
    Monthly,
    #[serde(rename = "Semi-Monthly")]
    SemiMonthly,
    #[serde(rename = "Bi-Weekly")]
    BiWeekly,
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "Rapid Bi-Weekly")]
    RapidBiWeekly,
    #[serde(rename = "Rapid Weekly")]
    RapidWeekly,
}

impl Frequency {
    /// All six frequencies in reporting order
    pub const ALL: [Frequency; 6] = [
        Frequency::Monthly,
        Frequency::SemiMonthly,
        Frequency::BiWeekly,
        Frequency::Weekly,
        Frequency::RapidBiWeekly,
        Frequency::RapidWeekly,
    ];

    /// Number of payment periods in one year
    pub const fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::SemiMonthly => 24,
            Frequency::BiWeekly | Frequency::RapidBiWeekly => 26,
            Frequency::Weekly | Frequency::RapidWeekly => 52,
        }
    }

    /// Number of payment periods per semi-annual compounding period.
    /// The per-period rate is the k-th root of one half-year's growth.
    pub const fn periods_per_half_year(self) -> u32 {
        self.periods_per_year() / 2
    }

    /// Rapid cadences pay a fraction of the monthly payment instead of
    /// their own annuity payment
    pub const fn is_rapid(self) -> bool {
        matches!(self, Frequency::RapidBiWeekly | Frequency::RapidWeekly)
    }

    /// Divisor applied to the monthly payment for rapid cadences
    pub const fn monthly_divisor(self) -> Option<u32> {
        match self {
            Frequency::RapidBiWeekly => Some(2),
            Frequency::RapidWeekly => Some(4),
            _ => None,
        }
    }

    /// Human-readable label, also the wire representation
    pub const fn label(self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::SemiMonthly => "Semi-Monthly",
            Frequency::BiWeekly => "Bi-Weekly",
            Frequency::Weekly => "Weekly",
            Frequency::RapidBiWeekly => "Rapid Bi-Weekly",
            Frequency::RapidWeekly => "Rapid Weekly",
        }
    }

    /// Worksheet / file stem: spaces become underscores, hyphens are dropped
    pub fn sheet_name(self) -> String {
        self.label().replace(' ', "_").replace('-', "")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .iter()
            .copied()
            .find(|freq| freq.label() == s)
            .ok_or_else(|| MortgageError::InvalidFrequency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        let periods: Vec<u32> = Frequency::ALL.iter().map(|f| f.periods_per_year()).collect();
        assert_eq!(periods, vec![12, 24, 26, 52, 26, 52]);
    }

    #[test]
    fn test_compounding_divisors() {
        let k: Vec<u32> = Frequency::ALL.iter().map(|f| f.periods_per_half_year()).collect();
        assert_eq!(k, vec![6, 12, 13, 26, 13, 26]);
    }

    #[test]
    fn test_label_parsing() {
        for freq in Frequency::ALL {
            assert_eq!(freq.label().parse::<Frequency>().unwrap(), freq);
        }

        let err = "Fortnightly".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, MortgageError::InvalidFrequency(ref s) if s == "Fortnightly"));
    }

    #[test]
    fn test_sheet_names() {
        assert_eq!(Frequency::SemiMonthly.sheet_name(), "SemiMonthly");
        assert_eq!(Frequency::RapidBiWeekly.sheet_name(), "Rapid_BiWeekly");
        assert_eq!(Frequency::RapidWeekly.sheet_name(), "Rapid_Weekly");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Frequency::RapidBiWeekly).unwrap();
        assert_eq!(json, "\"Rapid Bi-Weekly\"");

        let parsed: Frequency = serde_json::from_str("\"Semi-Monthly\"").unwrap();
        assert_eq!(parsed, Frequency::SemiMonthly);
    }
}
