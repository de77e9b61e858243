//! Rate conversion, payment options and amortization schedules

mod frequency;
mod rates;
mod engine;
mod schedule;

pub use frequency::Frequency;
pub use rates::RateSpec;
pub use engine::{AmortizationEngine, PaymentSet, annuity_payment};
pub use schedule::{Schedule, ScheduleRow, ScheduleSet, ScheduleSummary};

/// Round a currency amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1237.174_639), 1237.17);
        assert_eq!(round_cents(872.407_477), 872.41);
        assert_eq!(round_cents(-0.001), 0.0);
    }
}
