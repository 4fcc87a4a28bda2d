// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use finboard::ingest::{load_budget, load_ledger};
use finboard::models::TransactionKind;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn ledger_rows_become_typed_transactions() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.csv",
        "Date,Compte,Catégorie,Sous-catégories,Note,MAD,Revenu/dépense\n\
         2024-03-15,Compte Courant,Alimentation,Supermarché,Courses hebdo,-250.5,Dépense\n\
         2024-03-01,Compte Courant,Salaire,,,10000,Revenu\n\
         15/03/2024,Livret A,Épargne,Livret,,1500,Sorties\n",
    );
    let txs = load_ledger(&path).unwrap();
    assert_eq!(txs.len(), 3);

    // Expense amounts are ledger-negative; the magnitude is kept.
    assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(txs[0].description, "Alimentation - Supermarché - Courses hebdo");
    assert_eq!(txs[0].amount, dec("250.5"));
    assert_eq!(txs[0].kind, TransactionKind::Expense);
    assert_eq!(txs[0].account, "Compte Courant");

    // Empty optional cells do not leak separators into the description.
    assert_eq!(txs[1].description, "Salaire");
    assert_eq!(txs[1].kind, TransactionKind::Revenue);

    // DD/MM/YYYY dates are accepted.
    assert_eq!(txs[2].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(txs[2].description, "Épargne - Livret");
    assert_eq!(txs[2].kind, TransactionKind::Savings);
}

#[test]
fn unknown_kind_labels_default_to_expense() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.csv",
        "Date,Compte,Catégorie,MAD,Revenu/dépense\n\
         2024-01-01,Compte Courant,Divers,12,Transfert\n",
    );
    let txs = load_ledger(&path).unwrap();
    assert_eq!(txs[0].kind, TransactionKind::Expense);
}

#[test]
fn ledger_without_optional_columns_still_loads() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.csv",
        "Date,Compte,Catégorie,MAD,Revenu/dépense\n\
         2024-01-01,Compte Courant,Alimentation,42,Dépense\n",
    );
    let txs = load_ledger(&path).unwrap();
    assert_eq!(txs[0].description, "Alimentation");
}

#[test]
fn missing_required_columns_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.csv",
        "Date,Compte,Catégorie,Revenu/dépense\n\
         2024-01-01,Compte Courant,Alimentation,Dépense\n",
    );
    let err = load_ledger(&path).unwrap_err();
    assert!(err.to_string().contains("MAD"), "{}", err);
}

#[test]
fn invalid_cells_name_the_offending_line() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.csv",
        "Date,Compte,Catégorie,MAD,Revenu/dépense\n\
         2024-01-01,Compte Courant,Alimentation,10,Dépense\n\
         2024-01-02,Compte Courant,Alimentation,pas-un-nombre,Dépense\n",
    );
    let err = load_ledger(&path).unwrap_err();
    assert!(err.to_string().contains("ledger line 3"), "{}", err);

    let path = write_file(
        &dir,
        "ledger2.csv",
        "Date,Compte,Catégorie,MAD,Revenu/dépense\n\
         01-13-2024,Compte Courant,Alimentation,10,Dépense\n",
    );
    let err = load_ledger(&path).unwrap_err();
    assert!(err.to_string().contains("ledger line 2"), "{}", err);
}

#[test]
fn rows_with_missing_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "ledger.csv",
        "Date,Compte,Catégorie,MAD,Revenu/dépense\n\
         2024-01-01,,Alimentation,10,Dépense\n",
    );
    let err = load_ledger(&path).unwrap_err();
    assert!(err.to_string().contains("missing required value"), "{}", err);
}

#[test]
fn budget_headers_match_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "budget.csv",
        "CATÉGORIE,BUDGET ANNUEL (MAD)\n\
         Loyer,36000\n",
    );
    let budget = load_budget(&path).unwrap();
    assert_eq!(budget.get("Loyer"), Some(&dec("36000")));
}

#[test]
fn budget_skips_invalid_rows_and_trims_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "budget.csv",
        "Catégorie,Budget\n\
          Loyer ,36000\n\
         Alimentation,12000\n\
         ,999\n\
         Divers,abc\n",
    );
    let budget = load_budget(&path).unwrap();
    assert_eq!(budget.len(), 2);
    assert_eq!(budget.get("Loyer"), Some(&dec("36000")));
    assert_eq!(budget.get("Alimentation"), Some(&dec("12000")));
}

#[test]
fn budget_without_expected_headers_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "budget.csv",
        "Nom,Montant\n\
         Loyer,36000\n",
    );
    let err = load_budget(&path).unwrap_err();
    assert!(err.to_string().contains("must contain"), "{}", err);
}

#[test]
fn empty_budget_file_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "budget.csv", "Catégorie,Budget\n");
    let err = load_budget(&path).unwrap_err();
    assert!(err.to_string().contains("empty"), "{}", err);
}
