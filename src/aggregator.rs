// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget aggregation and alert classification.
//!
//! Everything here is a pure function over snapshots: budgets and transactions
//! go in, updated budgets or alert records come out. Persisting the result and
//! presenting alerts belong to the caller.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::models::{Alert, AlertDetail, AlertKind, Budget, Transaction, is_month_key, next_id};

const NEAR_LIMIT_PERCENT: i64 = 90;
const OVER_LIMIT_PERCENT: i64 = 100;

fn out_of_range(what: &str) -> CoreError {
    CoreError::validation(format!("{} is too large to compute", what))
}

/// Sum of expense amounts in `category` dated within `month`.
pub fn spent_for(category: &str, month: &str, transactions: &[Transaction]) -> Result<Decimal> {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| t.category() == Some(category))
        .filter(|t| t.month() == month)
        .try_fold(Decimal::ZERO, |acc, t| {
            acc.checked_add(t.amount)
                .ok_or_else(|| out_of_range(&format!("Spending on {} for {}", category, month)))
        })
}

/// Recompute `spent` for every budget from scratch. Fails without touching
/// anything when a total cannot be represented.
pub fn recompute_spent(budgets: &[Budget], transactions: &[Transaction]) -> Result<Vec<Budget>> {
    debug!(
        budgets = budgets.len(),
        transactions = transactions.len(),
        "recomputing budget spend"
    );
    budgets
        .iter()
        .map(|b| {
            Ok(Budget {
                spent: spent_for(&b.category, &b.month, transactions)?,
                ..b.clone()
            })
        })
        .collect()
}

/// Raw, unclamped percent of the cap used. Fails for a zero-amount budget
/// and when the ratio does not fit in a `Decimal`.
pub fn percent_used(budget: &Budget) -> Result<Decimal> {
    if budget.amount.is_zero() {
        return Err(CoreError::DegenerateBudget { id: budget.id });
    }
    budget
        .spent
        .checked_div(budget.amount)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| out_of_range(&format!("Usage of budget {}", budget.id)))
}

/// Percent for progress bars, clamped to `0..=100`.
pub fn display_percent(budget: &Budget) -> Decimal {
    match percent_used(budget) {
        Ok(p) => p.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
        Err(CoreError::DegenerateBudget { .. }) => Decimal::ZERO,
        // ratio too large to represent, far past the cap
        Err(_) => Decimal::ONE_HUNDRED,
    }
}

/// Classify a single budget. `Ok(None)` means below the near-limit threshold.
pub fn classify(budget: &Budget) -> Result<Option<Alert>> {
    let percent = match percent_used(budget) {
        Ok(p) => Some(p),
        Err(err @ CoreError::DegenerateBudget { .. }) => return Err(err),
        Err(_) => None,
    };
    let (kind, detail) = match percent {
        Some(p) if p < Decimal::from(NEAR_LIMIT_PERCENT) => return Ok(None),
        Some(p) if p < Decimal::from(OVER_LIMIT_PERCENT) => {
            let rounded = p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            (AlertKind::NearLimit, AlertDetail::PercentUsed(rounded))
        }
        _ => {
            let excess = budget
                .spent
                .checked_sub(budget.amount)
                .unwrap_or(budget.spent);
            (AlertKind::OverLimit, AlertDetail::OverBy(excess))
        }
    };
    Ok(Some(Alert {
        budget_id: budget.id,
        kind,
        category: budget.category.clone(),
        month: budget.month.clone(),
        detail,
    }))
}

/// Alerts for every budget at or past the near-limit threshold. Degenerate
/// budgets are logged and skipped.
pub fn evaluate_alerts(budgets: &[Budget]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for b in budgets {
        match classify(b) {
            Ok(Some(alert)) => alerts.push(alert),
            Ok(None) => {}
            Err(err) => warn!(error = %err, category = %b.category, month = %b.month, "skipping budget"),
        }
    }
    alerts
}

/// Alerts in `after` with no alert of the same kind for the same budget in `before`.
pub fn newly_raised(before: &[Alert], after: &[Alert]) -> Vec<Alert> {
    after
        .iter()
        .filter(|a| {
            !before
                .iter()
                .any(|b| b.budget_id == a.budget_id && b.kind == a.kind)
        })
        .cloned()
        .collect()
}

/// Create a budget for `(category, month)` and append it to `budgets`.
/// Nothing is appended when validation fails or the pair already exists.
pub fn create_budget(
    budgets: &mut Vec<Budget>,
    transactions: &[Transaction],
    category: &str,
    amount: Decimal,
    month: &str,
) -> Result<Budget> {
    let category = category.trim();
    let month = month.trim();
    if category.is_empty() {
        return Err(CoreError::validation("Please select a category"));
    }
    if amount <= Decimal::ZERO {
        return Err(CoreError::validation(
            "Please enter a valid amount greater than 0",
        ));
    }
    if !is_month_key(month) {
        return Err(CoreError::validation(format!(
            "Invalid month '{}', expected YYYY-MM",
            month
        )));
    }
    if budgets
        .iter()
        .any(|b| b.category == category && b.month == month)
    {
        return Err(CoreError::DuplicateBudget {
            category: category.to_string(),
            month: month.to_string(),
        });
    }

    let budget = Budget {
        id: next_id(budgets.iter().map(|b| b.id)),
        category: category.to_string(),
        amount,
        month: month.to_string(),
        spent: spent_for(category, month, transactions)?,
    };
    budgets.push(budget.clone());
    Ok(budget)
}

/// Remove the budget with `id`. Absent ids are not an error.
pub fn delete_budget(budgets: &[Budget], id: i64) -> Vec<Budget> {
    budgets.iter().filter(|b| b.id != id).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub id: i64,
    pub category: String,
    pub month: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub display_percent: Decimal,
    pub alert: Option<AlertKind>,
}

/// Per-budget summary, optionally restricted to one month. Newest month first, then by category.
pub fn budget_status(budgets: &[Budget], month: Option<&str>) -> Vec<BudgetStatus> {
    let mut rows: Vec<BudgetStatus> = budgets
        .iter()
        .filter(|b| month.is_none_or(|m| b.month == m))
        .map(|b| BudgetStatus {
            id: b.id,
            category: b.category.clone(),
            month: b.month.clone(),
            amount: b.amount,
            spent: b.spent,
            display_percent: display_percent(b),
            alert: classify(b).ok().flatten().map(|a| a.kind),
        })
        .collect();
    rows.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.category.cmp(&b.category)));
    rows
}
