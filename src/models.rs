// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{CoreError, Result};

/// Direction of money flow. Amounts are always positive; the sign lives here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Expense => f.write_str("expense"),
            TxType::Income => f.write_str("income"),
        }
    }
}

impl FromStr for TxType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TxType::Expense),
            "income" => Ok(TxType::Income),
            other => Err(CoreError::Validation(format!(
                "Invalid transaction type '{}', expected expense or income",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal, // USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: TxType,
}

impl Transaction {
    /// Category if one is assigned; an empty string counts as uncategorized.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn is_categorized(&self) -> bool {
        self.category().is_some()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxType::Expense
    }

    /// `YYYY-MM` key of the transaction date.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// User input for a new transaction; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub kind: TxType,
}

/// Partial update of a stored transaction. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub kind: Option<TxType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal, // USD monthly cap
    pub month: String,   // YYYY-MM
    #[serde(default)]
    pub spent: Decimal, // derived, see aggregator::recompute_spent
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub name: String,
    pub target: Decimal,
    pub current: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    /// 90% or more of the budget used, still under the cap.
    NearLimit,
    /// Spend has reached or passed the cap.
    OverLimit,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::NearLimit => f.write_str("near-limit"),
            AlertKind::OverLimit => f.write_str("over-limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum AlertDetail {
    /// Percent of the budget used, rounded to a whole number.
    PercentUsed(Decimal),
    /// `spent - amount`, in USD.
    OverBy(Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub budget_id: i64,
    pub kind: AlertKind,
    pub category: String,
    pub month: String,
    pub detail: AlertDetail,
}

impl Alert {
    /// User-facing text, with money rendered in `currency`.
    pub fn message(&self, currency: &Currency) -> Result<String> {
        Ok(match &self.detail {
            AlertDetail::PercentUsed(p) => format!(
                "You've used {}% of your {} budget for {}",
                p, self.category, self.month
            ),
            AlertDetail::OverBy(excess) => format!(
                "Over budget by {} on {} for {}!",
                currency.format(*excess)?,
                self.category,
                self.month
            ),
        })
    }
}

/// Next id for a collection: one past the largest existing id, starting at 1.
pub fn next_id<I>(ids: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    ids.into_iter().max().unwrap_or(0) + 1
}

/// Whether `s` is a well-formed `YYYY-MM` month key.
pub fn is_month_key(s: &str) -> bool {
    s.len() == 7
        && s.as_bytes()[4] == b'-'
        && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok()
}
