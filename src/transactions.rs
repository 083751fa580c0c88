// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::{Transaction, TransactionDraft, TransactionPatch, next_id};

fn check_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::validation("Please enter a valid amount"));
    }
    Ok(())
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Validate `draft` and build the stored record with the next free id.
pub fn add_transaction(existing: &[Transaction], draft: TransactionDraft) -> Result<Transaction> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(CoreError::validation("Please enter a description"));
    }
    check_amount(draft.amount)?;
    Ok(Transaction {
        id: next_id(existing.iter().map(|t| t.id)),
        date: draft.date,
        description: description.to_string(),
        amount: draft.amount,
        category: normalize_category(draft.category),
        kind: draft.kind,
    })
}

pub fn update_transaction(
    existing: &[Transaction],
    id: i64,
    patch: TransactionPatch,
) -> Result<Vec<Transaction>> {
    if !existing.iter().any(|t| t.id == id) {
        return Err(CoreError::NotFound {
            kind: "Transaction",
            id,
        });
    }
    if let Some(amount) = patch.amount {
        check_amount(amount)?;
    }
    if let Some(d) = &patch.description {
        if d.trim().is_empty() {
            return Err(CoreError::validation("Please enter a description"));
        }
    }

    Ok(existing
        .iter()
        .map(|t| {
            if t.id != id {
                return t.clone();
            }
            let mut t = t.clone();
            if let Some(date) = patch.date {
                t.date = date;
            }
            if let Some(d) = &patch.description {
                t.description = d.trim().to_string();
            }
            if let Some(amount) = patch.amount {
                t.amount = amount;
            }
            if let Some(kind) = patch.kind {
                t.kind = kind;
            }
            if patch.category.is_some() {
                t.category = normalize_category(patch.category.clone());
            }
            t
        })
        .collect())
}

/// Assign `category` to transaction `id`. An empty category is rejected and
/// leaves the collection untouched.
pub fn categorize(existing: &[Transaction], id: i64, category: &str) -> Result<Vec<Transaction>> {
    let category = category.trim();
    if category.is_empty() {
        return Err(CoreError::validation("Please select a category"));
    }
    update_transaction(
        existing,
        id,
        TransactionPatch {
            category: Some(category.to_string()),
            ..Default::default()
        },
    )
}

/// Working list of transactions still waiting for a category.
pub fn uncategorized(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| !t.is_categorized())
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePeriod {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "1month")]
    LastMonth,
}

impl FromStr for TimePeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "all" => Ok(TimePeriod::All),
            "7days" => Ok(TimePeriod::Last7Days),
            "1month" => Ok(TimePeriod::LastMonth),
            other => Err(CoreError::validation(format!(
                "Invalid period '{}', expected all, 7days or 1month",
                other
            ))),
        }
    }
}

impl TimePeriod {
    /// Earliest date kept by this period, or `None` for `All`.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimePeriod::All => None,
            TimePeriod::Last7Days => today.checked_sub_days(Days::new(7)),
            TimePeriod::LastMonth => today.checked_sub_months(Months::new(1)),
        }
    }
}

pub fn filter_by_period(
    transactions: &[Transaction],
    period: TimePeriod,
    today: NaiveDate,
) -> Vec<Transaction> {
    match period.cutoff(today) {
        None => transactions.to_vec(),
        Some(cutoff) => transactions
            .iter()
            .filter(|t| t.date >= cutoff)
            .cloned()
            .collect(),
    }
}
