// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(sub)?,
        _ => {}
    }
    Ok(())
}

/// Prorated budget vs actual spend per category, over the active filter.
fn report(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = super::resolve_view(sub, None)?;

    if maybe_print_json(json_flag, jsonl_flag, &view.expense_summary_data)? {
        return Ok(());
    }

    let mut rows: Vec<Vec<String>> = view
        .expense_summary_data
        .iter()
        .map(|r| {
            vec![
                r.category.clone(),
                fmt_money(&r.actual_amount),
                fmt_money(&r.prorated_budget),
                fmt_money(&r.difference),
            ]
        })
        .collect();
    let (actual, prorated, difference) = super::summary_totals(&view.expense_summary_data);
    rows.push(vec![
        "Total".to_string(),
        fmt_money(&actual),
        fmt_money(&prorated),
        fmt_money(&difference),
    ]);
    println!(
        "{}",
        pretty_table(
            &["Catégorie", "Dépenses Réelles", "Budget (Période)", "Écart"],
            rows,
        )
    );
    println!("Période filtrée: {} jours", view.filter_period.days);
    Ok(())
}
