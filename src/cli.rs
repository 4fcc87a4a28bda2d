// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, ensure};
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::models::{DateRange, FilterState};
use crate::utils::parse_date;

/// Input files plus the shared filter flags, carried by every data
/// subcommand.
fn input_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("ledger")
            .long("ledger")
            .value_name("FILE")
            .required(true)
            .help("Transaction ledger CSV"),
    )
    .arg(
        Arg::new("budget")
            .long("budget")
            .value_name("FILE")
            .help("Annual budget CSV"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .value_name("YEAR|all")
            .help("Filter on a calendar year"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_name("1-12|all")
            .help("Filter on a calendar month"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("DATE")
            .help("Custom range start, inclusive (overrides year/month)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("DATE")
            .help("Custom range end, inclusive (overrides year/month)"),
    )
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    )
}

fn export_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .value_name("csv|json")
            .required(true)
            .help("Output format"),
    )
    .arg(
        Arg::new("out")
            .long("out")
            .value_name("FILE")
            .required(true)
            .help("Output path"),
    )
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal-finance dashboard: ledger analytics, budget tracking, report export")
        .subcommand(json_args(input_args(Command::new("dashboard").about(
            "Full dashboard: KPIs with previous-period deltas, monthly evolution, distributions, budget summary",
        ))))
        .subcommand(
            Command::new("tx").about("Ledger entries").subcommand(
                json_args(input_args(
                    Command::new("list").about("List filtered transactions, newest first"),
                ))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .help("Keep only the first N rows"),
                ),
            ),
        )
        .subcommand(
            Command::new("report")
                .about("Individual dashboard series")
                .subcommand(json_args(input_args(
                    Command::new("monthly").about("Monthly revenue/expense/savings evolution"),
                )))
                .subcommand(json_args(input_args(Command::new("expenses").about(
                    "Expense distribution: main budget categories plus 'Autres'",
                ))))
                .subcommand(json_args(input_args(
                    Command::new("revenue").about("Top revenue categories"),
                )))
                .subcommand(json_args(input_args(
                    Command::new("savings").about("Savings distribution by category"),
                ))),
        )
        .subcommand(
            Command::new("budget")
                .about("Budget reconciliation")
                .subcommand(json_args(input_args(
                    Command::new("report").about("Prorated budget vs actual spend per category"),
                ))),
        )
        .subcommand(json_args(input_args(
            Command::new("categories").about("Distinct category keys per transaction kind"),
        )))
        .subcommand(
            Command::new("export")
                .about("Write reports to files")
                .subcommand(export_args(input_args(
                    Command::new("transactions").about("Export the filtered ledger"),
                )))
                .subcommand(export_args(input_args(
                    Command::new("report").about("Export KPIs and the budget reconciliation"),
                ))),
        )
}

/// Build the engine filter from the shared flags. `default_year` applies
/// when `--year` is absent (the dashboard defaults to the current year,
/// everything else to all).
pub fn filters_from_matches(sub: &ArgMatches, default_year: Option<i32>) -> Result<FilterState> {
    let year = match sub.get_one::<String>("year").map(String::as_str) {
        None => default_year,
        Some("all") => None,
        Some(raw) => Some(
            raw.parse::<i32>()
                .with_context(|| format!("Invalid year '{}'", raw))?,
        ),
    };
    let month = match sub.get_one::<String>("month").map(String::as_str) {
        None | Some("all") => None,
        Some(raw) => {
            let m: u32 = raw
                .parse()
                .with_context(|| format!("Invalid month '{}'", raw))?;
            ensure!((1..=12).contains(&m), "Month must be 1-12, got {}", m);
            Some(m)
        }
    };
    let start = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    Ok(FilterState {
        year,
        month,
        date_range: DateRange { start, end },
    })
}
