// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;

use crate::utils::{fmt_money, maybe_print_json, pretty_table};

/// Full dashboard view. Without `--year`, the current calendar year is
/// selected, matching the interactive dashboard's default filter.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let current_year = chrono::Utc::now().date_naive().year();
    let view = super::resolve_view(m, Some(current_year))?;

    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    let k = &view.kpis;
    let p = &view.previous_kpis;
    let kpi_rows = vec![
        vec![
            "Total Revenus".to_string(),
            fmt_money(&k.total_revenue),
            percent_change(k.total_revenue, p.total_revenue),
        ],
        vec![
            "Total Dépenses".to_string(),
            fmt_money(&k.total_expenses),
            percent_change(k.total_expenses, p.total_expenses),
        ],
        vec![
            "Total Épargne".to_string(),
            fmt_money(&k.total_savings),
            percent_change(k.total_savings, p.total_savings),
        ],
        vec![
            "Solde Net".to_string(),
            fmt_money(&k.net_balance),
            String::new(),
        ],
        vec![
            "Taux d'Épargne".to_string(),
            format!("{} %", k.savings_rate.round_dp(2)),
            String::new(),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["KPI", "Valeur", "vs période précédente"], kpi_rows)
    );
    println!("Période filtrée: {} jours", view.filter_period.days);

    println!("\nÉvolution Mensuelle");
    super::reports::print_monthly_table(&view.monthly_chart_data);

    println!("\nRépartition des Dépenses");
    super::reports::print_category_table(&view.category_chart_data, "Dépenses");

    println!("\nRépartition des Revenus");
    super::reports::print_category_table(&view.revenue_by_category_data, "Revenus");

    println!("\nRépartition de l'Épargne");
    super::reports::print_category_table(&view.savings_distribution_data, "Épargne");

    println!("\nSynthèse Budgétaire");
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
    Ok(())
}

/// Percent change against the previous period, "-" when there is no
/// baseline to compare against.
fn percent_change(current: Decimal, previous: Decimal) -> String {
    if previous > Decimal::ZERO {
        let pct = (current - previous) / previous * Decimal::ONE_HUNDRED;
        let pct = pct.round_dp(1);
        if pct >= Decimal::ZERO {
            format!("+{} %", pct)
        } else {
            format!("{} %", pct)
        }
    } else {
        "-".to_string()
    }
}
