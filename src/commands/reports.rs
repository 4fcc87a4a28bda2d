// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::engine::{CategoryPoint, MonthlyRecord};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(sub)?,
        Some(("expenses", sub)) => expenses(sub)?,
        Some(("revenue", sub)) => revenue(sub)?,
        Some(("savings", sub)) => savings(sub)?,
        _ => {}
    }
    Ok(())
}

fn monthly(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = super::resolve_view(sub, None)?;
    if !maybe_print_json(json_flag, jsonl_flag, &view.monthly_chart_data)? {
        print_monthly_table(&view.monthly_chart_data);
    }
    Ok(())
}

fn expenses(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = super::resolve_view(sub, None)?;
    if !maybe_print_json(json_flag, jsonl_flag, &view.category_chart_data)? {
        print_category_table(&view.category_chart_data, "Dépenses");
    }
    Ok(())
}

fn revenue(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = super::resolve_view(sub, None)?;
    if !maybe_print_json(json_flag, jsonl_flag, &view.revenue_by_category_data)? {
        print_category_table(&view.revenue_by_category_data, "Revenus");
    }
    Ok(())
}

fn savings(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = super::resolve_view(sub, None)?;
    if !maybe_print_json(json_flag, jsonl_flag, &view.savings_distribution_data)? {
        print_category_table(&view.savings_distribution_data, "Épargne");
    }
    Ok(())
}

pub(crate) fn print_monthly_table(records: &[MonthlyRecord]) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                fmt_money(&r.revenus),
                fmt_money(&r.depenses),
                fmt_money(&r.epargne),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Mois", "Revenus", "Dépenses", "Épargne"], rows)
    );
}

pub(crate) fn print_category_table(points: &[CategoryPoint], value_header: &str) {
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| vec![p.name.clone(), fmt_money(&p.value)])
        .collect();
    println!("{}", pretty_table(&["Catégorie", value_header], rows));
}
