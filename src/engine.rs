// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Finance-data derivation engine: turns the raw ledger plus the annual
//! budget into filtered transactions, KPIs, period comparisons, monthly
//! series, category distributions and a budget reconciliation. Pure and
//! synchronous; every output is recomputed from the inputs on each call.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetData, FilterState, Transaction, TransactionKind};
use crate::utils::month_end;

/// Remainder bucket label. Part of the data contract: exports and charts
/// carry it verbatim.
pub const OTHERS_LABEL: &str = "Autres";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub net_balance: Decimal,
    /// Percentage, not a fraction. Zero when there is no revenue.
    pub savings_rate: Decimal,
}

/// Comparison baseline for the inferred previous period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecord {
    /// Zero-padded `YYYY-MM` key.
    pub name: String,
    pub revenus: Decimal,
    pub depenses: Decimal,
    pub epargne: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPoint {
    pub name: String,
    pub value: Decimal,
}

/// One budget reconciliation row. Positive `difference` = under budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub category: String,
    pub actual_amount: Decimal,
    pub prorated_budget: Decimal,
    pub difference: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FilterPeriod {
    /// Inclusive day span of the filtered set, 0 when it is empty.
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceView {
    pub filtered_transactions: Vec<Transaction>,
    pub kpis: Kpis,
    pub previous_kpis: PeriodTotals,
    pub monthly_chart_data: Vec<MonthlyRecord>,
    pub category_chart_data: Vec<CategoryPoint>,
    pub revenue_by_category_data: Vec<CategoryPoint>,
    pub savings_distribution_data: Vec<CategoryPoint>,
    pub expense_summary_data: Vec<BudgetRow>,
    pub filter_period: FilterPeriod,
    pub expense_categories: Vec<String>,
    pub revenue_categories: Vec<String>,
    pub savings_categories: Vec<String>,
}

/// Category key of a description: the token before the first `" - "`.
/// Falls back to the whole description when the separator is absent or
/// the leading token is empty.
pub fn category_key(description: &str) -> &str {
    match description.split_once(" - ") {
        Some(("", _)) | None => description,
        Some((key, _)) => key,
    }
}

fn matches_filter(filters: &FilterState, date: NaiveDate) -> bool {
    // A custom range overrides the year/month selectors entirely.
    if filters.date_range.is_active() {
        if let Some(start) = filters.date_range.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = filters.date_range.end {
            // End bound is inclusive of its whole calendar day.
            if date > end {
                return false;
            }
        }
        return true;
    }
    if let Some(year) = filters.year {
        if date.year() != year {
            return false;
        }
    }
    if let Some(month) = filters.month {
        if date.month() != month {
            return false;
        }
    }
    true
}

/// Matching transactions, newest first. The sort is stable, so same-day
/// entries keep their ledger order.
pub fn filter_transactions(transactions: &[Transaction], filters: &FilterState) -> Vec<Transaction> {
    let mut txs: Vec<Transaction> = transactions
        .iter()
        .filter(|t| matches_filter(filters, t.date))
        .cloned()
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    txs
}

fn period_bounds(txs: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let start = txs.iter().map(|t| t.date).min()?;
    let end = txs.iter().map(|t| t.date).max()?;
    Some((start, end))
}

fn period_days(bounds: Option<(NaiveDate, NaiveDate)>) -> i64 {
    match bounds {
        Some((start, end)) => (end - start).num_days() + 1,
        None => 0,
    }
}

fn sum_by_kind<'a>(txs: impl Iterator<Item = &'a Transaction>) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for t in txs {
        match t.kind {
            TransactionKind::Revenue => totals.total_revenue += t.amount,
            TransactionKind::Expense => totals.total_expenses += t.amount,
            TransactionKind::Savings => totals.total_savings += t.amount,
        }
    }
    totals
}

fn kpis_from(totals: PeriodTotals) -> Kpis {
    let net_balance = totals.total_revenue - totals.total_expenses - totals.total_savings;
    let savings_rate = if totals.total_revenue > Decimal::ZERO {
        totals.total_savings / totals.total_revenue * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    Kpis {
        total_revenue: totals.total_revenue,
        total_expenses: totals.total_expenses,
        total_savings: totals.total_savings,
        net_balance,
        savings_rate,
    }
}

/// Previous-period bounds, inferred from the filter category rather than
/// from the filtered data. Rules, evaluated in order:
/// 1. custom range active and current bounds resolved: the immediately
///    preceding window of identical duration;
/// 2. specific year and month: the previous calendar month;
/// 3. specific year only (no range): the previous calendar year;
/// 4. otherwise none.
fn previous_period(
    filters: &FilterState,
    current: Option<(NaiveDate, NaiveDate)>,
) -> Option<(NaiveDate, NaiveDate)> {
    let range_active = filters.date_range.is_active();
    if range_active {
        if let Some((start, end)) = current {
            let duration = end - start;
            let prev_end = start - Duration::days(1);
            return Some((prev_end - duration, prev_end));
        }
    }
    match (filters.year, filters.month) {
        (Some(year), Some(month)) => {
            let (py, pm) = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
            Some((NaiveDate::from_ymd_opt(py, pm, 1)?, month_end(py, pm)?))
        }
        (Some(year), None) if !range_active => Some((
            NaiveDate::from_ymd_opt(year - 1, 1, 1)?,
            NaiveDate::from_ymd_opt(year - 1, 12, 31)?,
        )),
        _ => None,
    }
}

/// Monthly revenue/expense/savings series, one record per observed
/// `YYYY-MM`, ascending. Months without transactions are not synthesized.
fn monthly_series(txs: &[Transaction]) -> Vec<MonthlyRecord> {
    let mut monthly: BTreeMap<String, MonthlyRecord> = BTreeMap::new();
    for t in txs {
        let key = format!("{:04}-{:02}", t.date.year(), t.date.month());
        let record = monthly.entry(key.clone()).or_insert_with(|| MonthlyRecord {
            name: key,
            revenus: Decimal::ZERO,
            depenses: Decimal::ZERO,
            epargne: Decimal::ZERO,
        });
        match t.kind {
            TransactionKind::Revenue => record.revenus += t.amount,
            TransactionKind::Expense => record.depenses += t.amount,
            TransactionKind::Savings => record.epargne += t.amount,
        }
    }
    monthly.into_values().collect()
}

/// Per-category sums for one kind, descending by value.
fn distribution(txs: &[Transaction], kind: TransactionKind) -> Vec<CategoryPoint> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in txs.iter().filter(|t| t.kind == kind) {
        *sums
            .entry(category_key(&t.description).to_string())
            .or_insert(Decimal::ZERO) += t.amount;
    }
    let mut points: Vec<CategoryPoint> = sums
        .into_iter()
        .map(|(name, value)| CategoryPoint { name, value })
        .collect();
    points.sort_by(|a, b| b.value.cmp(&a.value));
    points
}

/// Budget reconciliation over the union of budgeted and observed expense
/// categories. The annual figure is prorated to the filter's day span
/// against an average year of 365.25 days.
fn expense_summary(
    expenses: &[CategoryPoint],
    budget: &BudgetData,
    days: i64,
) -> Vec<BudgetRow> {
    let actuals: BTreeMap<&str, Decimal> =
        expenses.iter().map(|p| (p.name.as_str(), p.value)).collect();
    let prorating_factor = if days > 0 {
        Decimal::from(days) / Decimal::new(36525, 2)
    } else {
        Decimal::ZERO
    };

    let mut categories: BTreeSet<&str> = budget.keys().map(String::as_str).collect();
    categories.extend(actuals.keys());

    let mut rows: Vec<BudgetRow> = categories
        .into_iter()
        .map(|category| {
            let actual_amount = actuals.get(category).copied().unwrap_or(Decimal::ZERO);
            let annual = budget.get(category).copied().unwrap_or(Decimal::ZERO);
            let prorated_budget = annual * prorating_factor;
            BudgetRow {
                category: category.to_string(),
                actual_amount,
                prorated_budget,
                difference: prorated_budget - actual_amount,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.actual_amount.cmp(&a.actual_amount));
    rows
}

/// Chart bucketing. Which categories stay visible is driven by budget
/// weight (greedy prefix reaching 80% of the total prorated budget), but
/// the displayed magnitudes are the actual expense values; everything
/// outside the main set collapses into the `"Autres"` bucket.
fn category_chart(expenses: &[CategoryPoint], summary: &[BudgetRow]) -> Vec<CategoryPoint> {
    let total_prorated: Decimal = summary.iter().map(|r| r.prorated_budget).sum();

    // No budget for the period: fall back to top 6 by actual spend.
    if total_prorated <= Decimal::ZERO {
        if expenses.len() <= 7 {
            return expenses.to_vec();
        }
        let mut chart: Vec<CategoryPoint> = expenses[..6].to_vec();
        let others: Decimal = expenses[6..].iter().map(|p| p.value).sum();
        if others > Decimal::ZERO {
            chart.push(CategoryPoint {
                name: OTHERS_LABEL.to_string(),
                value: others,
            });
        }
        return chart;
    }

    // Main categories: the greedy prefix covering 80% of the budget.
    let threshold = total_prorated * Decimal::new(8, 1);
    let mut by_budget: Vec<&BudgetRow> = summary.iter().collect();
    by_budget.sort_by(|a, b| b.prorated_budget.cmp(&a.prorated_budget));

    let mut main_categories: BTreeSet<&str> = BTreeSet::new();
    let mut cumulative = Decimal::ZERO;
    for row in by_budget {
        main_categories.insert(row.category.as_str());
        cumulative += row.prorated_budget;
        if cumulative >= threshold {
            break;
        }
    }

    let mut chart = Vec::new();
    let mut others = Decimal::ZERO;
    for point in expenses {
        if main_categories.contains(point.name.as_str()) {
            chart.push(point.clone());
        } else {
            others += point.value;
        }
    }
    if others > Decimal::ZERO {
        chart.push(CategoryPoint {
            name: OTHERS_LABEL.to_string(),
            value: others,
        });
    }
    chart
}

/// Sorted distinct category keys of one kind over the full ledger, for
/// filter UIs.
fn category_names(transactions: &[Transaction], kind: TransactionKind) -> Vec<String> {
    let names: BTreeSet<&str> = transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| category_key(&t.description))
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Derive the complete dashboard view. Inputs are already validated by
/// ingestion; only the arithmetic invariant is asserted here.
pub fn compute_finance_view(
    transactions: &[Transaction],
    budget: &BudgetData,
    filters: &FilterState,
) -> FinanceView {
    debug_assert!(
        transactions.iter().all(|t| t.amount >= Decimal::ZERO),
        "transaction amounts must be non-negative magnitudes"
    );

    let filtered = filter_transactions(transactions, filters);
    let bounds = period_bounds(&filtered);
    let filter_period = FilterPeriod {
        days: period_days(bounds),
    };

    let kpis = kpis_from(sum_by_kind(filtered.iter()));
    let previous_kpis = previous_period(filters, bounds)
        .map(|(start, end)| {
            sum_by_kind(
                transactions
                    .iter()
                    .filter(|t| t.date >= start && t.date <= end),
            )
        })
        .unwrap_or_default();

    let monthly_chart_data = monthly_series(&filtered);
    let expense_points = distribution(&filtered, TransactionKind::Expense);
    let mut revenue_by_category_data = distribution(&filtered, TransactionKind::Revenue);
    revenue_by_category_data.truncate(7);
    let savings_distribution_data = distribution(&filtered, TransactionKind::Savings);

    let expense_summary_data = expense_summary(&expense_points, budget, filter_period.days);
    let category_chart_data = category_chart(&expense_points, &expense_summary_data);

    FinanceView {
        expense_categories: category_names(transactions, TransactionKind::Expense),
        revenue_categories: category_names(transactions, TransactionKind::Revenue),
        savings_categories: category_names(transactions, TransactionKind::Savings),
        filtered_transactions: filtered,
        kpis,
        previous_kpis,
        monthly_chart_data,
        category_chart_data,
        revenue_by_category_data,
        savings_distribution_data,
        expense_summary_data,
        filter_period,
    }
}
