// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sub)?,
        _ => {}
    }
    Ok(())
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = super::resolve_view(sub, None)?;

    let mut txs = view.filtered_transactions;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &txs)? {
        let rows: Vec<Vec<String>> = txs
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.account.clone(),
                    t.description.clone(),
                    fmt_money(&t.amount),
                    t.kind.label().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Compte", "Description", "Montant", "Type"], rows)
        );
    }
    Ok(())
}
