//! Side-by-side comparison of payment frequencies for one loan
//!
//! Builds every schedule once, then reduces each to a summary line so the
//! effect of accelerated (rapid) payments is visible at a glance.

use crate::config::LoanConfig;
use crate::mortgage::{round_cents, Frequency, PaymentSet, ScheduleSet, ScheduleSummary};
use serde::{Deserialize, Serialize};

/// One frequency's line in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonLine {
    pub frequency: Frequency,
    pub payment: f64,
    pub periods: u32,
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub ending_balance: f64,
    /// Interest paid by the monthly schedule minus interest paid here
    pub interest_saved: f64,
    pub paid_off: bool,
}

/// Comparison of all built schedules for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyComparison {
    pub lines: Vec<ComparisonLine>,
}

impl FrequencyComparison {
    /// Summarize an already-built schedule set
    pub fn from_schedules(schedules: &ScheduleSet) -> Self {
        let summaries: Vec<ScheduleSummary> = schedules.iter().map(|(_, s)| s.summary()).collect();
        let monthly_interest = summaries
            .iter()
            .find(|s| s.frequency == Frequency::Monthly)
            .map(|s| s.total_interest);

        let lines = summaries
            .iter()
            .map(|s| ComparisonLine {
                frequency: s.frequency,
                payment: s.payment,
                periods: s.periods,
                interest_paid: s.total_interest,
                principal_paid: s.total_principal,
                ending_balance: s.final_balance,
                interest_saved: monthly_interest
                    .map(|m| round_cents(m - s.total_interest))
                    .unwrap_or(0.0),
                paid_off: s.paid_off,
            })
            .collect();

        Self { lines }
    }

    pub fn get(&self, frequency: Frequency) -> Option<&ComparisonLine> {
        self.lines.iter().find(|l| l.frequency == frequency)
    }

    /// Frequency leaving the smallest balance at the end of the term
    pub fn lowest_ending_balance(&self) -> Option<&ComparisonLine> {
        self.lines
            .iter()
            .min_by(|a, b| a.ending_balance.total_cmp(&b.ending_balance))
    }
}

/// Everything computed for one loan: payment options, schedules, comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub config: LoanConfig,
    pub payments: PaymentSet,
    pub schedules: ScheduleSet,
    pub comparison: FrequencyComparison,
}

impl LoanAnalysis {
    /// Run every frequency for the loan described by `config`
    pub fn run(config: &LoanConfig) -> Self {
        Self::run_selected(config, &Frequency::ALL)
    }

    /// Run only the given frequencies
    pub fn run_selected(config: &LoanConfig, frequencies: &[Frequency]) -> Self {
        let engine = config.engine();
        let payments = engine.payments(config.principal);
        let schedules = engine.build_selected(config.principal, config.term_years, frequencies);
        let comparison = FrequencyComparison::from_schedules(&schedules);

        Self {
            config: config.clone(),
            payments,
            schedules,
            comparison,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LoanConfig {
        LoanConfig {
            principal: 300_000.0,
            quoted_rate: 5.0,
            amortization_years: 25,
            term_years: 5.0,
        }
    }

    #[test]
    fn test_comparison_covers_all_frequencies() {
        let analysis = LoanAnalysis::run(&config());
        assert_eq!(analysis.comparison.lines.len(), 6);
        assert_eq!(analysis.comparison.get(Frequency::Monthly).unwrap().interest_saved, 0.0);

        let monthly = analysis.comparison.get(Frequency::Monthly).unwrap();
        assert_eq!(monthly.periods, 60);
        assert_eq!(monthly.payment, analysis.payments.monthly);
    }

    #[test]
    fn test_rapid_weekly_leaves_lowest_balance() {
        let analysis = LoanAnalysis::run(&config());
        let best = analysis.comparison.lowest_ending_balance().unwrap();
        assert_eq!(best.frequency, Frequency::RapidWeekly);
    }

    #[test]
    fn test_selected_frequencies() {
        let analysis = LoanAnalysis::run_selected(&config(), &[Frequency::Weekly, Frequency::RapidWeekly]);
        assert_eq!(analysis.schedules.len(), 2);
        // No monthly schedule to compare against
        assert!(analysis.comparison.lines.iter().all(|l| l.interest_saved == 0.0));
    }

    #[test]
    fn test_rate_shock() {
        let base = LoanAnalysis::run(&config());
        let shocked_config = LoanConfig { quoted_rate: 6.0, ..config() };
        let shocked = LoanAnalysis::run(&shocked_config);

        assert!(shocked.payments.monthly > base.payments.monthly);
        // The recorded inputs are the ones the payments were computed from
        assert_eq!(shocked.config.quoted_rate, 6.0);
        assert_eq!(shocked.payments, shocked_config.engine().payments(300_000.0));
    }
}
