// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of ledger entry. The ledger spreadsheet labels these
/// "Revenu", "Dépense" and "Sorties" (outflow to savings/investment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "Revenu")]
    Revenue,
    #[serde(rename = "Dépense")]
    Expense,
    #[serde(rename = "Sorties")]
    Savings,
}

impl TransactionKind {
    /// Label used in tables and exports, matching the ledger vocabulary.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Revenue => "Revenu",
            TransactionKind::Expense => "Dépense",
            TransactionKind::Savings => "Sorties",
        }
    }
}

/// One ledger entry. `amount` is a non-negative magnitude; the direction
/// is carried by `kind`. Ingestion guarantees the invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub account: String,
}

/// Annual budget: category key -> yearly amount, keys trimmed at ingestion.
pub type BudgetData = BTreeMap<String, Decimal>;

/// Optional date range filter. When either bound is set it takes
/// precedence over the year/month filters; the end bound is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// Active filter. `None` means "all" for year and month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub date_range: DateRange,
}

impl FilterState {
    pub fn for_year(year: i32) -> Self {
        FilterState {
            year: Some(year),
            ..FilterState::default()
        }
    }

    pub fn for_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        FilterState {
            date_range: DateRange { start, end },
            ..FilterState::default()
        }
    }
}
