//! Export of schedules for spreadsheets, charts and other consumers

mod schedule_csv;

pub use schedule_csv::{
    export_schedules, write_balance_decline_csv, write_schedule_csv, BALANCE_DECLINE_FILE, SCHEDULE_HEADER,
};

use crate::comparison::LoanAnalysis;
use crate::error::Result;
use crate::mortgage::ScheduleSet;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Schedules as a JSON object keyed by frequency label
pub fn schedule_set_to_json(schedules: &ScheduleSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedules)?)
}

/// Write a full analysis (inputs, payments, schedules, comparison) as JSON
pub fn write_analysis_json<P: AsRef<Path>>(analysis: &LoanAnalysis, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), analysis)?;
    info!("Wrote analysis to {}", path.as_ref().display());
    Ok(())
}
