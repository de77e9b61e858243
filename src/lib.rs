//! Mortgage Calculator - payment options and amortization schedules
//!
//! This library provides:
//! - Conversion of a quoted, semi-annually compounded rate into effective
//!   per-period rates for six payment cadences
//! - Level payment amounts for each cadence, including rapid (accelerated) options
//! - Period-by-period amortization schedules over a term
//! - Side-by-side frequency comparison and CSV / JSON export

pub mod error;
pub mod mortgage;
pub mod comparison;
pub mod config;
pub mod export;

// Re-export commonly used types
pub use error::{MortgageError, Result};
pub use mortgage::{AmortizationEngine, Frequency, PaymentSet, RateSpec, Schedule, ScheduleRow, ScheduleSet};
pub use comparison::{FrequencyComparison, LoanAnalysis};
pub use config::{LoanConfig, PartialLoanConfig};
