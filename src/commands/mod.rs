// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod transactions;
pub mod budgets;
pub mod dashboard;
pub mod reports;
pub mod exporter;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::engine::{self, BudgetRow, FinanceView};
use crate::models::BudgetData;
use crate::{cli, ingest};

/// Load the input files named by the shared flags, build the filter and
/// run the engine once.
pub(crate) fn resolve_view(
    sub: &clap::ArgMatches,
    default_year: Option<i32>,
) -> Result<FinanceView> {
    let ledger_path = sub.get_one::<String>("ledger").unwrap();
    let transactions = ingest::load_ledger(ledger_path)?;
    let budget = match sub.get_one::<String>("budget") {
        Some(path) => ingest::load_budget(path)?,
        None => BudgetData::new(),
    };
    let filters = cli::filters_from_matches(sub, default_year)?;
    Ok(engine::compute_finance_view(&transactions, &budget, &filters))
}

/// (actual, prorated, difference) column totals of the reconciliation.
pub(crate) fn summary_totals(rows: &[BudgetRow]) -> (Decimal, Decimal, Decimal) {
    rows.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(actual, prorated, difference), r| {
            (
                actual + r.actual_amount,
                prorated + r.prorated_budget,
                difference + r.difference,
            )
        },
    )
}
