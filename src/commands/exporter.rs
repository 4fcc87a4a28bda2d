// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde_json::json;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(sub),
        Some(("report", sub)) => export_report(sub),
        _ => Ok(()),
    }
}

fn export_transactions(sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let view = super::resolve_view(sub, None)?;
    let txs = &view.filtered_transactions;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "compte", "description", "montant", "type"])?;
            for t in txs {
                wtr.write_record([
                    t.date.to_string(),
                    t.account.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.kind.label().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(txs)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}

/// KPI block plus the budget reconciliation with a totals line.
fn export_report(sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let view = super::resolve_view(sub, None)?;
    let (actual, prorated, difference) = super::summary_totals(&view.expense_summary_data);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(out)?;
            wtr.write_record(["Indicateur", "Valeur"])?;
            let k = &view.kpis;
            let kpi_lines = [
                ("Total Revenus", k.total_revenue.round_dp(2).to_string()),
                ("Total Dépenses", k.total_expenses.round_dp(2).to_string()),
                ("Total Épargne", k.total_savings.round_dp(2).to_string()),
                ("Solde Net", k.net_balance.round_dp(2).to_string()),
                ("Taux d'Épargne (%)", k.savings_rate.round_dp(2).to_string()),
                ("Période (jours)", view.filter_period.days.to_string()),
            ];
            for (label, value) in kpi_lines {
                wtr.write_record([label.to_string(), value])?;
            }
            wtr.write_record([""])?;
            wtr.write_record(["Catégorie", "Dépenses Réelles", "Budget (Période)", "Écart"])?;
            for r in &view.expense_summary_data {
                wtr.write_record([
                    r.category.clone(),
                    r.actual_amount.round_dp(2).to_string(),
                    r.prorated_budget.round_dp(2).to_string(),
                    r.difference.round_dp(2).to_string(),
                ])?;
            }
            wtr.write_record([
                "Total".to_string(),
                actual.round_dp(2).to_string(),
                prorated.round_dp(2).to_string(),
                difference.round_dp(2).to_string(),
            ])?;
            wtr.flush()?;
        }
        "json" => {
            let payload = json!({
                "kpis": view.kpis,
                "filter_period": view.filter_period,
                "expense_summary": view.expense_summary_data,
                "totals": {
                    "actual_amount": actual,
                    "prorated_budget": prorated,
                    "difference": difference,
                },
            });
            std::fs::write(out, serde_json::to_string_pretty(&payload)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported report to {}", out);
    Ok(())
}
