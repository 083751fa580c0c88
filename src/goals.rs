// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goals. Independent of budgets and transactions.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CoreError, Result};
use crate::models::{Goal, GoalDraft, next_id};

pub const GOAL_COLORS: [&str; 7] = [
    "#9b87f5", "#D946EF", "#1EAEDB", "#F97316", "#10B981", "#0EA5E9", "#8E9196",
];

pub fn add_goal(existing: &[Goal], draft: GoalDraft) -> Result<Goal> {
    let name = draft.name.trim();
    if name.is_empty() || draft.target <= Decimal::ZERO {
        return Err(CoreError::validation(
            "Please enter a name and a valid target amount",
        ));
    }
    let current = draft.current.unwrap_or(Decimal::ZERO);
    if current < Decimal::ZERO {
        return Err(CoreError::validation("Current amount cannot be negative"));
    }
    Ok(Goal {
        id: next_id(existing.iter().map(|g| g.id)),
        name: name.to_string(),
        target: draft.target,
        current,
        color: GOAL_COLORS[existing.len() % GOAL_COLORS.len()].to_string(),
        deadline: draft.deadline,
        notes: draft.notes.filter(|n| !n.trim().is_empty()),
    })
}

/// Add `amount` to goal `id`. Savings never pass the target and never go
/// down, even for a goal created above its target.
pub fn contribute(goals: &[Goal], id: i64, amount: Decimal) -> Result<Vec<Goal>> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::validation(
            "Contribution must be greater than 0",
        ));
    }
    let mut out = goals.to_vec();
    let goal = out
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or(CoreError::NotFound { kind: "Goal", id })?;
    let raised = goal
        .current
        .checked_add(amount)
        .ok_or_else(|| CoreError::validation("Contribution is too large"))?;
    goal.current = raised.min(goal.target).max(goal.current);
    Ok(out)
}

pub fn delete_goal(goals: &[Goal], id: i64) -> Vec<Goal> {
    goals.iter().filter(|g| g.id != id).cloned().collect()
}

impl Goal {
    /// Whole-number percent complete, capped at 100.
    pub fn percent_complete(&self) -> Decimal {
        if self.target <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.current
            .checked_div(self.target)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .map_or(Decimal::ONE_HUNDRED, |p| p.min(Decimal::ONE_HUNDRED))
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}
