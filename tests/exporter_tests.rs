// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use tempfile::TempDir;

use finboard::{cli, commands::exporter};

const LEDGER: &str = "Date,Compte,Catégorie,Sous-catégories,Note,MAD,Revenu/dépense\n\
                      2024-03-15,Compte Courant,Alimentation,Supermarché,,-250.5,Dépense\n\
                      2024-03-01,Compte Courant,Salaire,,,10000,Revenu\n";

const BUDGET: &str = "Catégorie,Budget\n\
                      Alimentation,12000\n\
                      Loyer,36000\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn run_export(args: &[&str]) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_writes_pretty_json() {
    let dir = TempDir::new().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER);
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&[
        "finboard",
        "export",
        "transactions",
        "--ledger",
        &ledger,
        "--format",
        "json",
        "--out",
        &out_str,
    ])
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2024-03-15",
                "description": "Alimentation - Supermarché",
                "amount": "250.5",
                "kind": "Dépense",
                "account": "Compte Courant"
            },
            {
                "date": "2024-03-01",
                "description": "Salaire",
                "amount": "10000",
                "kind": "Revenu",
                "account": "Compte Courant"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_newest_first() {
    let dir = TempDir::new().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER);
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&[
        "finboard",
        "export",
        "transactions",
        "--ledger",
        &ledger,
        "--year",
        "2024",
        "--format",
        "csv",
        "--out",
        &out_str,
    ])
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,compte,description,montant,type");
    assert_eq!(
        lines[1],
        "2024-03-15,Compte Courant,Alimentation - Supermarché,250.5,Dépense"
    );
    assert_eq!(lines[2], "2024-03-01,Compte Courant,Salaire,10000,Revenu");
}

#[test]
fn export_report_includes_kpis_reconciliation_and_totals() {
    let dir = TempDir::new().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER);
    let budget = write_file(&dir, "budget.csv", BUDGET);
    let out_path = dir.path().join("report.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&[
        "finboard",
        "export",
        "report",
        "--ledger",
        &ledger,
        "--budget",
        &budget,
        "--format",
        "csv",
        "--out",
        &out_str,
    ])
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.contains("Total Revenus,10000.00"), "{}", contents);
    assert!(contents.contains("Total Dépenses,250.50"), "{}", contents);
    assert!(
        contents.contains("Catégorie,Dépenses Réelles,Budget (Période),Écart"),
        "{}",
        contents
    );
    // Observed category first (highest actual), budget-only after, totals last.
    let alim = contents.lines().position(|l| l.starts_with("Alimentation,"));
    let loyer = contents.lines().position(|l| l.starts_with("Loyer,"));
    let total = contents.lines().position(|l| l.starts_with("Total,"));
    assert!(alim.unwrap() < loyer.unwrap());
    assert!(loyer.unwrap() < total.unwrap());
}

#[test]
fn export_report_json_carries_the_summary_payload() {
    let dir = TempDir::new().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER);
    let budget = write_file(&dir, "budget.csv", BUDGET);
    let out_path = dir.path().join("report.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&[
        "finboard",
        "export",
        "report",
        "--ledger",
        &ledger,
        "--budget",
        &budget,
        "--format",
        "json",
        "--out",
        &out_str,
    ])
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["kpis"]["total_revenue"], json!("10000"));
    assert_eq!(parsed["filter_period"]["days"], json!(15));
    let summary = parsed["expense_summary"].as_array().unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0]["category"], json!("Alimentation"));
    assert_eq!(parsed["totals"]["actual_amount"], json!("250.5"));
}

#[test]
fn export_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let ledger = write_file(&dir, "ledger.csv", LEDGER);
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let result = run_export(&[
        "finboard",
        "export",
        "transactions",
        "--ledger",
        &ledger,
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    assert!(result.is_err());
    assert!(!out_path.exists());
}
