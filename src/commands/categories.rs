// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::utils::{maybe_print_json, pretty_table};

#[derive(Serialize)]
struct CategoryLists<'a> {
    expenses: &'a [String],
    revenue: &'a [String],
    savings: &'a [String],
}

/// Distinct category keys per transaction kind, over the full ledger.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let view = super::resolve_view(m, None)?;

    let lists = CategoryLists {
        expenses: &view.expense_categories,
        revenue: &view.revenue_categories,
        savings: &view.savings_categories,
    };
    if maybe_print_json(json_flag, jsonl_flag, &lists)? {
        return Ok(());
    }

    let mut rows = Vec::new();
    for (kind, names) in [
        ("Dépense", &view.expense_categories),
        ("Revenu", &view.revenue_categories),
        ("Sorties", &view.savings_categories),
    ] {
        for name in names {
            rows.push(vec![kind.to_string(), name.clone()]);
        }
    }
    println!("{}", pretty_table(&["Type", "Catégorie"], rows));
    Ok(())
}
