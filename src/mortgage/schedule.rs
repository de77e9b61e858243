//! Amortization schedule output structures

use super::frequency::Frequency;
use super::round_cents;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "Period")]
    pub period: u32,
    #[serde(rename = "Starting Balance")]
    pub starting_balance: f64,
    #[serde(rename = "Interest")]
    pub interest: f64,
    #[serde(rename = "Payment")]
    pub payment: f64,
    #[serde(rename = "Ending Balance")]
    pub ending_balance: f64,
}

impl ScheduleRow {
    /// Principal retired in this period
    pub fn principal_paid(&self) -> f64 {
        round_cents(self.starting_balance - self.ending_balance)
    }
}

/// Complete schedule for one frequency over one term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub frequency: Frequency,

    /// Periodic payment applied in every row
    pub payment: f64,

    /// Periods requested for the term, before any early payoff
    pub requested_periods: u32,

    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn new(frequency: Frequency, payment: f64, requested_periods: u32) -> Self {
        Self {
            frequency,
            payment,
            requested_periods,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleRow> {
        self.rows.iter()
    }

    /// Balance left at the end of the schedule
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.ending_balance).unwrap_or(0.0)
    }

    /// True when the balance reached zero before the term ran out
    pub fn paid_off_early(&self) -> bool {
        (self.rows.len() as u32) < self.requested_periods
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let principal_repaid: f64 = self.rows.iter().map(ScheduleRow::principal_paid).sum();
        let final_balance = self.final_balance();

        ScheduleSummary {
            frequency: self.frequency,
            payment: self.payment,
            periods: self.rows.len() as u32,
            total_interest: round_cents(total_interest),
            total_principal: round_cents(principal_repaid),
            total_paid: round_cents(total_interest + principal_repaid),
            final_balance,
            paid_off: !self.rows.is_empty() && final_balance <= 0.0,
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleRow;
    type IntoIter = std::slice::Iter<'a, ScheduleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub frequency: Frequency,
    pub payment: f64,
    pub periods: u32,
    pub total_interest: f64,
    pub total_principal: f64,
    /// Interest plus principal actually paid; the final row may pay less than
    /// a full payment
    pub total_paid: f64,
    pub final_balance: f64,
    pub paid_off: bool,
}

/// Schedules for one loan keyed by frequency, iterated in reporting order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleSet {
    schedules: BTreeMap<Frequency, Schedule>,
}

impl ScheduleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schedule: Schedule) {
        self.schedules.insert(schedule.frequency, schedule);
    }

    pub fn get(&self, frequency: Frequency) -> Option<&Schedule> {
        self.schedules.get(&frequency)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn frequencies(&self) -> impl Iterator<Item = Frequency> + '_ {
        self.schedules.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Frequency, &Schedule)> {
        self.schedules.iter().map(|(f, s)| (*f, s))
    }

    /// Longest schedule length, i.e. the number of periods a chart needs
    pub fn max_periods(&self) -> usize {
        self.schedules.values().map(Schedule::len).max().unwrap_or(0)
    }
}

impl FromIterator<Schedule> for ScheduleSet {
    fn from_iter<I: IntoIterator<Item = Schedule>>(iter: I) -> Self {
        let mut set = ScheduleSet::new();
        for schedule in iter {
            set.insert(schedule);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_schedule() -> Schedule {
        let mut schedule = Schedule::new(Frequency::Monthly, 600.0, 3);
        schedule.add_row(ScheduleRow {
            period: 1,
            starting_balance: 1000.0,
            interest: 10.0,
            payment: 600.0,
            ending_balance: 410.0,
        });
        schedule.add_row(ScheduleRow {
            period: 2,
            starting_balance: 410.0,
            interest: 4.1,
            payment: 600.0,
            ending_balance: 0.0,
        });
        schedule
    }

    #[test]
    fn test_summary() {
        let summary = sample_schedule().summary();
        assert_eq!(summary.periods, 2);
        assert_abs_diff_eq!(summary.total_interest, 14.10, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.total_principal, 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.total_paid, 1014.10, epsilon = 1e-9);
        assert!(summary.paid_off);
    }

    #[test]
    fn test_early_payoff_flag() {
        let schedule = sample_schedule();
        assert!(schedule.paid_off_early());
        assert_eq!(schedule.final_balance(), 0.0);
        assert_abs_diff_eq!(schedule.rows[0].principal_paid(), 590.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::new(Frequency::Weekly, 100.0, 0);
        assert!(schedule.is_empty());
        assert!(!schedule.paid_off_early());
        assert!(!schedule.summary().paid_off);
    }

    #[test]
    fn test_row_serializes_with_column_names() {
        let row = sample_schedule().rows[0];
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["Starting Balance"], 1000.0);
        assert_eq!(json["Ending Balance"], 410.0);
    }

    #[test]
    fn test_schedule_set_order() {
        let set: ScheduleSet = [Frequency::RapidWeekly, Frequency::Monthly, Frequency::BiWeekly]
            .into_iter()
            .map(|f| Schedule::new(f, 1.0, 1))
            .collect();

        let order: Vec<Frequency> = set.frequencies().collect();
        assert_eq!(order, vec![Frequency::Monthly, Frequency::BiWeekly, Frequency::RapidWeekly]);
        assert!(set.get(Frequency::Weekly).is_none());
    }
}
