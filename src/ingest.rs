// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV ingestion for the two input files: the transaction ledger and the
//! annual budget. All validation happens here; the engine receives
//! already-valid values.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use thiserror::Error;

use crate::models::{BudgetData, Transaction, TransactionKind};
use crate::utils::{parse_date, parse_decimal};

const LEDGER_COLUMNS: [&str; 5] = ["Date", "Compte", "Catégorie", "MAD", "Revenu/dépense"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("ledger is missing required columns: {0}")]
    MissingColumns(String),
    #[error("ledger line {line}: {message}")]
    InvalidRow { line: usize, message: String },
    #[error("budget file must contain 'Catégorie' and 'Budget' columns")]
    BudgetHeaders,
    #[error("budget file is empty")]
    EmptyBudget,
}

fn invalid_row(line: usize, message: impl Into<String>) -> IngestError {
    IngestError::InvalidRow {
        line,
        message: message.into(),
    }
}

/// Load the transaction ledger. Required columns: `Date`, `Compte`,
/// `Catégorie`, `MAD`, `Revenu/dépense`; `Sous-catégories` and `Note` are
/// optional and folded into the description. Amounts are stored as
/// non-negative magnitudes, the direction lives in the kind column.
pub fn load_ledger(path: &str) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open ledger CSV {}", path))?;

    let headers = rdr.headers().context("Read ledger headers")?.clone();
    let position =
        |name: &str| -> Option<usize> { headers.iter().position(|h| h.trim() == name) };

    let missing: Vec<&str> = LEDGER_COLUMNS
        .iter()
        .copied()
        .filter(|c| position(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing.join(", ")).into());
    }

    let date_col = position("Date").unwrap();
    let account_col = position("Compte").unwrap();
    let category_col = position("Catégorie").unwrap();
    let amount_col = position("MAD").unwrap();
    let kind_col = position("Revenu/dépense").unwrap();
    let subcategory_col = position("Sous-catégories");
    let note_col = position("Note");

    let mut transactions = Vec::new();
    // Line 1 is the header row; data starts on line 2.
    for (index, result) in rdr.records().enumerate() {
        let line = index + 2;
        let rec = result.with_context(|| format!("Read ledger line {}", line))?;
        let cell = |col: usize| rec.get(col).unwrap_or("").trim();

        let date_raw = cell(date_col);
        let account = cell(account_col);
        let category = cell(category_col);
        let amount_raw = cell(amount_col);
        let kind_raw = cell(kind_col);
        if date_raw.is_empty()
            || account.is_empty()
            || category.is_empty()
            || amount_raw.is_empty()
            || kind_raw.is_empty()
        {
            return Err(invalid_row(line, "missing required value").into());
        }

        let date = parse_date(date_raw)
            .map_err(|_| invalid_row(line, format!("invalid date '{}'", date_raw)))?;
        let amount = parse_decimal(amount_raw)
            .map_err(|_| invalid_row(line, format!("invalid amount '{}'", amount_raw)))?
            .abs();
        let kind = match kind_raw {
            "Revenu" => TransactionKind::Revenue,
            "Sorties" => TransactionKind::Savings,
            _ => TransactionKind::Expense,
        };

        let mut parts = vec![category];
        if let Some(col) = subcategory_col {
            parts.push(cell(col));
        }
        if let Some(col) = note_col {
            parts.push(cell(col));
        }
        let description = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" - ");
        let description = if description.is_empty() {
            "Non décrit".to_string()
        } else {
            description
        };

        transactions.push(Transaction {
            date,
            description,
            amount,
            kind,
            account: account.to_string(),
        });
    }
    Ok(transactions)
}

/// Load the annual budget: one column whose header contains "catégorie"
/// and one containing "budget", matched case-insensitively. Rows with an
/// empty category or a non-numeric amount are skipped; duplicate keys
/// keep the last value.
pub fn load_budget(path: &str) -> Result<BudgetData> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open budget CSV {}", path))?;

    let headers = rdr.headers().context("Read budget headers")?.clone();
    let find = |needle: &str| -> Option<usize> {
        headers
            .iter()
            .position(|h| h.trim().to_lowercase().contains(needle))
    };
    let category_col = find("catégorie");
    let budget_col = find("budget");

    let records: Vec<csv::StringRecord> = rdr
        .records()
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Read budget CSV {}", path))?;
    if records.is_empty() {
        return Err(IngestError::EmptyBudget.into());
    }
    let (category_col, budget_col) = match (category_col, budget_col) {
        (Some(c), Some(b)) => (c, b),
        _ => return Err(IngestError::BudgetHeaders.into()),
    };

    let mut budget = BudgetData::new();
    for rec in records {
        let category = rec.get(category_col).unwrap_or("").trim();
        let amount_raw = rec.get(budget_col).unwrap_or("").trim();
        if category.is_empty() {
            continue;
        }
        if let Ok(amount) = parse_decimal(amount_raw) {
            budget.insert(category.to_string(), amount);
        }
    }
    Ok(budget)
}
