//! Mortgage Calculator CLI
//!
//! Prints the six payment options for a loan, then writes one schedule CSV
//! per frequency and a balance-decline series for charting.
//!
//! Inputs come from (lowest to highest priority) a JSON config file, the
//! MORTGAGE_PRINCIPAL / MORTGAGE_RATE / MORTGAGE_AMORTIZATION_YEARS /
//! MORTGAGE_TERM_YEARS environment variables, and command-line flags.
//! Anything still missing is prompted for on stdin.

use anyhow::{bail, Context};
use clap::Parser;
use mortgage_calculator::config::{parse_field, PartialLoanConfig};
use mortgage_calculator::export::{export_schedules, write_analysis_json};
use mortgage_calculator::{Frequency, LoanAnalysis, LoanConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "mortgage_calculator", version, about = "Mortgage payment options and amortization schedules")]
struct Cli {
    /// Mortgage principal amount
    #[arg(short, long)]
    principal: Option<f64>,

    /// Quoted annual interest rate in percent (e.g. 5 for 5%)
    #[arg(short, long)]
    rate: Option<f64>,

    /// Amortization period in years
    #[arg(short, long)]
    amortization: Option<u32>,

    /// Term of the mortgage in years
    #[arg(short, long)]
    term: Option<f64>,

    /// JSON file with principal / quoted_rate / amortization_years / term_years
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the CSV output
    #[arg(short, long, default_value = "mortgage_output")]
    output_dir: PathBuf,

    /// Also write the full analysis as JSON
    #[arg(long)]
    json: bool,

    /// Fail instead of prompting for missing inputs
    #[arg(long)]
    no_prompt: bool,
}

impl Cli {
    fn flags(&self) -> PartialLoanConfig {
        PartialLoanConfig {
            principal: self.principal,
            quoted_rate: self.rate,
            amortization_years: self.amortization,
            term_years: self.term,
        }
    }
}

fn prompt<T: FromStr>(field: &'static str, message: &str) -> anyhow::Result<T> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("no input for {}", field);
    }
    Ok(parse_field(field, &line)?)
}

fn resolve_config(cli: &Cli) -> anyhow::Result<LoanConfig> {
    let mut partial = match &cli.config {
        Some(path) => PartialLoanConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PartialLoanConfig::default(),
    };
    partial = partial.merge(PartialLoanConfig::from_env()?).merge(cli.flags());

    if partial.missing().is_empty() || cli.no_prompt {
        return Ok(partial.resolve()?);
    }

    println!("WELCOME TO THE MORTGAGE PAYMENT CALCULATOR!");
    if partial.principal.is_none() {
        partial.principal = Some(prompt("principal", "Enter the mortgage principal amount: ")?);
    }
    if partial.quoted_rate.is_none() {
        partial.quoted_rate = Some(prompt("quoted_rate", "Enter the quoted annual interest rate (ex. 2 for 2%): ")?);
    }
    if partial.amortization_years.is_none() {
        partial.amortization_years = Some(prompt("amortization_years", "Enter the amortization period (in years): ")?);
    }
    if partial.term_years.is_none() {
        partial.term_years = Some(prompt("term_years", "Enter the term of the mortgage (in years): ")?);
    }

    Ok(partial.resolve()?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    println!("Mortgage Calculator v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Loan:");
    println!("  Principal: ${:.2}", config.principal);
    println!("  Quoted Rate: {}% (compounded semi-annually)", config.quoted_rate);
    println!("  Amortization: {} years", config.amortization_years);
    println!("  Term: {} years", config.term_years);
    println!();

    let analysis = LoanAnalysis::run(&config);

    println!("Payment Options:");
    for (frequency, payment) in analysis.payments.iter() {
        println!("  {:<16} ${:>12.2}", frequency.label(), payment);
    }
    println!();

    println!("Over the {}-year term:", config.term_years);
    println!(
        "{:<16} {:>8} {:>14} {:>14} {:>14} {:>12}",
        "Frequency", "Periods", "Interest", "Principal", "End Balance", "vs Monthly"
    );
    println!("{}", "-".repeat(84));
    for line in &analysis.comparison.lines {
        println!(
            "{:<16} {:>8} {:>14.2} {:>14.2} {:>14.2} {:>12.2}",
            line.frequency.label(),
            line.periods,
            line.interest_paid,
            line.principal_paid,
            line.ending_balance,
            line.interest_saved,
        );
    }

    if let Some(best) = analysis.comparison.lowest_ending_balance() {
        println!(
            "\nLowest balance at end of term: {} (${:.2})",
            best.frequency.label(),
            best.ending_balance
        );
    }

    if let Some(schedule) = analysis.schedules.get(Frequency::Monthly) {
        if schedule.paid_off_early() {
            println!("\nMonthly schedule pays off after {} periods", schedule.len());
        }
    }

    let written = export_schedules(&analysis.schedules, &cli.output_dir)
        .with_context(|| format!("writing schedules to {}", cli.output_dir.display()))?;

    println!("\nFiles created successfully:");
    for path in &written {
        println!(" - {}", path.display());
    }

    if cli.json {
        let path = cli.output_dir.join("analysis.json");
        write_analysis_json(&analysis, &path)?;
        println!(" - {}", path.display());
    }

    Ok(())
}
