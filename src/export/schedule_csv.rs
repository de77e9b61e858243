//! CSV output: one file per frequency plus the balance-decline series

use crate::error::Result;
use crate::mortgage::{Schedule, ScheduleSet};
use csv::Writer;
use log::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SCHEDULE_HEADER: [&str; 5] = ["Period", "Starting Balance", "Interest", "Payment", "Ending Balance"];

/// File holding ending balance by period for every frequency
pub const BALANCE_DECLINE_FILE: &str = "balance_decline.csv";

/// Write one schedule as CSV
pub fn write_schedule_csv<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(SCHEDULE_HEADER)?;

    for row in schedule {
        csv.write_record([
            row.period.to_string(),
            format!("{:.2}", row.starting_balance),
            format!("{:.2}", row.interest),
            format!("{:.2}", row.payment),
            format!("{:.2}", row.ending_balance),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write ending balance by period, one column per frequency
///
/// Cells are left empty once a frequency's schedule has ended.
pub fn write_balance_decline_csv<W: Write>(schedules: &ScheduleSet, writer: W) -> Result<()> {
    let mut csv = Writer::from_writer(writer);

    let mut header = vec!["Period".to_string()];
    header.extend(schedules.frequencies().map(|f| f.label().to_string()));
    csv.write_record(&header)?;

    for idx in 0..schedules.max_periods() {
        let mut record = vec![(idx + 1).to_string()];
        for (_, schedule) in schedules.iter() {
            record.push(
                schedule
                    .rows
                    .get(idx)
                    .map(|row| format!("{:.2}", row.ending_balance))
                    .unwrap_or_default(),
            );
        }
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write every schedule and the balance-decline series into `dir`
///
/// Returns the paths written, schedules first in reporting order.
pub fn export_schedules<P: AsRef<Path>>(schedules: &ScheduleSet, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(schedules.len() + 1);

    for (frequency, schedule) in schedules.iter() {
        let path = dir.join(format!("{}.csv", frequency.sheet_name()));
        write_schedule_csv(schedule, File::create(&path)?)?;
        info!("Wrote {} rows for {} to {}", schedule.len(), frequency, path.display());
        written.push(path);
    }

    let path = dir.join(BALANCE_DECLINE_FILE);
    write_balance_decline_csv(schedules, File::create(&path)?)?;
    info!("Wrote balance decline series to {}", path.display());
    written.push(path);

    Ok(written)
}
