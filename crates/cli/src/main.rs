// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use time::{Date, macros::format_description};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_log::AsTrace;
use wrls_domain::{
    AbstractionInterval, AbstractionWindow, ChargePeriod, determine_abstraction_periods,
    format_abstraction_periods,
};
use wrls_review::{MemoryReviewStore, review_charge_element, review_charge_reference};

const NO_ABSTRACTION: &str = "No abstraction in this charge period";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Abstraction periods and two-part tariff review from the command line
#[derive(Debug, Parser)]
#[command(name = "wrls", version, about, styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Print the parts of a charge period in which an abstraction window is open
    #[command(visible_alias = "p")]
    Periods {
        /// First day of the charge period (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: Date,

        /// Last day of the charge period (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: Date,

        /// Abstraction window as start and end day/month, e.g. 1/10-30/4
        #[arg(long, value_parser = parse_window)]
        window: AbstractionWindow,
    },

    /// Print a review charge reference, or one of its elements, as JSON
    #[command(visible_alias = "r")]
    Review {
        /// JSON file of review charge references
        #[arg(long)]
        fixture: PathBuf,

        /// Review charge reference id
        #[arg(long)]
        reference: String,

        /// 1-based charge element to show instead of the whole reference
        #[arg(long)]
        element: Option<usize>,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::Periods { start, end, window } => periods(start, end, window),
            Self::Review {
                fixture,
                reference,
                element,
            } => review(&fixture, &reference, element),
        }
    }
}

fn periods(start: Date, end: Date, window: AbstractionWindow) -> Result<()> {
    let charge_period: ChargePeriod =
        ChargePeriod::new(start, end).wrap_err("Invalid charge period")?;
    let intervals: Vec<AbstractionInterval> =
        determine_abstraction_periods(&charge_period, &window);
    debug!(intervals = intervals.len(), "Resolved abstraction periods");

    if intervals.is_empty() {
        println!("{NO_ABSTRACTION}");
    }
    for period in format_abstraction_periods(&intervals) {
        println!("{period}");
    }
    Ok(())
}

fn review(fixture: &Path, reference: &str, element: Option<usize>) -> Result<()> {
    let json: String = std::fs::read_to_string(fixture)
        .wrap_err_with(|| format!("Failed to read {}", fixture.display()))?;
    let store: MemoryReviewStore = MemoryReviewStore::from_json(&json)
        .wrap_err_with(|| format!("Failed to load {}", fixture.display()))?;
    info!(
        fixture = %fixture.display(),
        records = store.ids().len(),
        "Loaded review fixture"
    );

    let output: String = match element {
        Some(element_index) => {
            let view = review_charge_element(&store, reference, element_index)?;
            serde_json::to_string_pretty(&view)?
        }
        None => {
            let view = review_charge_reference(&store, reference, None)?;
            serde_json::to_string_pretty(&view)?
        }
    };
    println!("{output}");
    Ok(())
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|err| format!("Expected a date like 2023-04-01: {err}"))
}

fn parse_day_month(value: &str) -> Option<(u8, u8)> {
    let (day, month) = value.trim().split_once('/')?;
    Some((day.trim().parse().ok()?, month.trim().parse().ok()?))
}

fn parse_window(value: &str) -> Result<AbstractionWindow, String> {
    let usage = || format!("Expected a window like 1/4-31/10, got '{value}'");

    let (start, end) = value.split_once('-').ok_or_else(usage)?;
    let (start_day, start_month) = parse_day_month(start).ok_or_else(usage)?;
    let (end_day, end_month) = parse_day_month(end).ok_or_else(usage)?;

    AbstractionWindow::new(start_day, start_month, end_day, end_month)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2023-04-01").unwrap(), date!(2023 - 04 - 01));
        assert!(parse_date("01/04/2023").is_err());
    }

    #[test]
    fn test_parse_window() {
        let window: AbstractionWindow = parse_window("1/10-30/4").unwrap();
        assert_eq!(window, AbstractionWindow::new(1, 10, 30, 4).unwrap());

        let window: AbstractionWindow = parse_window(" 1/4 - 31/10 ").unwrap();
        assert_eq!(window, AbstractionWindow::new(1, 4, 31, 10).unwrap());
    }

    #[test]
    fn test_parse_window_rejects_bad_input() {
        assert!(parse_window("1/10").is_err());
        assert!(parse_window("a/10-30/4").is_err());
        assert_eq!(
            parse_window("1/13-30/4").unwrap_err(),
            "Invalid month: 13. Must be between 1 and 12"
        );
    }

    #[test]
    fn test_args_parse() {
        let args: Args = Args::try_parse_from([
            "wrls",
            "periods",
            "--start",
            "2023-04-01",
            "--end",
            "2024-03-31",
            "--window",
            "1/11-31/3",
        ])
        .unwrap();

        let Command::Periods { start, end, window } = args.command else {
            panic!("Expected the periods command");
        };
        assert_eq!(start, date!(2023 - 04 - 01));
        assert_eq!(end, date!(2024 - 03 - 31));
        assert!(window.wraps_new_year());
    }
}
