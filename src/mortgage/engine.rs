//! Payment and amortization engine

use super::frequency::Frequency;
use super::rates::RateSpec;
use super::round_cents;
use super::schedule::{Schedule, ScheduleRow, ScheduleSet};
use crate::error::Result;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The six periodic payment options for one principal, rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSet {
    #[serde(rename = "Monthly")]
    pub monthly: f64,
    #[serde(rename = "Semi-Monthly")]
    pub semi_monthly: f64,
    #[serde(rename = "Bi-Weekly")]
    pub bi_weekly: f64,
    #[serde(rename = "Weekly")]
    pub weekly: f64,
    #[serde(rename = "Rapid Bi-Weekly")]
    pub rapid_bi_weekly: f64,
    #[serde(rename = "Rapid Weekly")]
    pub rapid_weekly: f64,
}

impl PaymentSet {
    /// Payment for one frequency
    pub fn get(&self, frequency: Frequency) -> f64 {
        match frequency {
            Frequency::Monthly => self.monthly,
            Frequency::SemiMonthly => self.semi_monthly,
            Frequency::BiWeekly => self.bi_weekly,
            Frequency::Weekly => self.weekly,
            Frequency::RapidBiWeekly => self.rapid_bi_weekly,
            Frequency::RapidWeekly => self.rapid_weekly,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Frequency, f64)> + '_ {
        Frequency::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// Level payment that retires `principal` over `periods` at `rate` per period
///
/// A zero rate falls back to straight-line repayment.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return principal / periods as f64;
    }
    principal * rate / (1.0 - (1.0 + rate).powf(-(periods as f64)))
}

/// Computes payment options and amortization schedules for one quoted rate
/// and amortization horizon. Holds no per-call state, so one engine can be
/// shared across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationEngine {
    rates: RateSpec,
}

impl AmortizationEngine {
    /// Create an engine from a quoted annual rate in percent (5.0 for 5%)
    pub fn new(quoted_rate_pct: f64, amortization_years: u32) -> Self {
        Self::from_rate_spec(RateSpec::from_percent(quoted_rate_pct, amortization_years))
    }

    pub fn from_rate_spec(rates: RateSpec) -> Self {
        debug!(
            "Engine: nominal={:.6} amortization={}y monthly_rate={:.10}",
            rates.nominal_rate(),
            rates.amortization_years(),
            rates.period_rate(Frequency::Monthly)
        );
        Self { rates }
    }

    pub fn rates(&self) -> &RateSpec {
        &self.rates
    }

    pub fn semi_annual_rate(&self) -> f64 {
        self.rates.semi_annual_rate()
    }

    pub fn effective_annual_rate(&self) -> f64 {
        self.rates.effective_annual_rate()
    }

    pub fn period_rate(&self, frequency: Frequency) -> f64 {
        self.rates.period_rate(frequency)
    }

    /// Unrounded payment; rapid cadences divide the unrounded monthly payment
    fn raw_payment(&self, principal: f64, frequency: Frequency) -> f64 {
        match frequency.monthly_divisor() {
            Some(divisor) => self.raw_payment(principal, Frequency::Monthly) / divisor as f64,
            None => annuity_payment(
                principal,
                self.rates.period_rate(frequency),
                self.rates.amortization_periods(frequency),
            ),
        }
    }

    /// Periodic payment for a single frequency, rounded to cents
    pub fn payment(&self, principal: f64, frequency: Frequency) -> f64 {
        round_cents(self.raw_payment(principal, frequency))
    }

    /// All six payment options for `principal`
    pub fn payments(&self, principal: f64) -> PaymentSet {
        PaymentSet {
            monthly: self.payment(principal, Frequency::Monthly),
            semi_monthly: self.payment(principal, Frequency::SemiMonthly),
            bi_weekly: self.payment(principal, Frequency::BiWeekly),
            weekly: self.payment(principal, Frequency::Weekly),
            rapid_bi_weekly: self.payment(principal, Frequency::RapidBiWeekly),
            rapid_weekly: self.payment(principal, Frequency::RapidWeekly),
        }
    }

    /// Periods covered by a term of `term_years`, truncated toward zero
    pub fn term_periods(term_years: f64, frequency: Frequency) -> u32 {
        (term_years * frequency.periods_per_year() as f64).floor().max(0.0) as u32
    }

    /// Build the amortization schedule for one term and frequency
    ///
    /// Every row is rounded to cents and the rounded ending balance carries
    /// into the next period. Stops early once the balance reaches zero.
    pub fn build_schedule(&self, principal: f64, term_years: f64, frequency: Frequency) -> Schedule {
        let rate = self.rates.period_rate(frequency);
        let payment = self.payment(principal, frequency);
        let periods = Self::term_periods(term_years, frequency);

        let mut schedule = Schedule::new(frequency, payment, periods);
        let mut balance = round_cents(principal);

        for period in 1..=periods {
            let starting_balance = balance;
            let interest = round_cents(starting_balance * rate);
            let principal_paid = payment - interest;
            let ending_balance = round_cents((starting_balance - principal_paid).max(0.0));

            schedule.add_row(ScheduleRow {
                period,
                starting_balance,
                interest,
                payment,
                ending_balance,
            });

            balance = ending_balance;
            if balance <= 0.0 {
                break;
            }
        }

        debug!(
            "{} schedule: payment={:.2} rate={:.10} rows={}/{} final_balance={:.2}",
            frequency,
            payment,
            rate,
            schedule.len(),
            periods,
            schedule.final_balance()
        );

        schedule
    }

    /// Build a schedule for a frequency given by its label
    pub fn build_schedule_for_label(&self, principal: f64, term_years: f64, label: &str) -> Result<Schedule> {
        let frequency: Frequency = label.parse()?;
        Ok(self.build_schedule(principal, term_years, frequency))
    }

    /// Build schedules for the given frequencies in parallel
    pub fn build_selected(&self, principal: f64, term_years: f64, frequencies: &[Frequency]) -> ScheduleSet {
        frequencies
            .par_iter()
            .map(|&f| self.build_schedule(principal, term_years, f))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    /// Build schedules for all six frequencies
    pub fn build_all(&self, principal: f64, term_years: f64) -> ScheduleSet {
        self.build_selected(principal, term_years, &Frequency::ALL)
    }
}
