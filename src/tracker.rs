// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The single mutation path over a user's data.
//!
//! Every mutating call is a full read-modify-write of the affected collections.
//! Calls that change the transaction set run [`Tracker::transactions_changed`]
//! exactly once: budgets are recomputed in memory, the new transactions and
//! budgets are committed together, and alerts that were not already active
//! are handed to the sink. Nothing is written when any step fails.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregator::{self, evaluate_alerts, newly_raised, recompute_spent};
use crate::error::{CoreError, Result};
use crate::goals;
use crate::models::{
    Alert, Budget, Goal, GoalDraft, Transaction, TransactionDraft, TransactionPatch,
};
use crate::notify::NotificationSink;
use crate::store::{BudgetStore, GoalStore, Ledger, TransactionSource};
use crate::transactions;

pub struct Tracker<S, N> {
    store: S,
    sink: N,
}

impl<S, N> Tracker<S, N>
where
    S: Ledger,
    N: NotificationSink,
{
    pub fn new(store: S, sink: N) -> Self {
        Tracker { store, sink }
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn into_parts(self) -> (S, N) {
        (self.store, self.sink)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        TransactionSource::list(&self.store)
    }

    pub fn budgets(&self) -> Result<Vec<Budget>> {
        BudgetStore::list(&self.store)
    }

    pub fn goals(&self) -> Result<Vec<Goal>> {
        GoalStore::list(&self.store)
    }

    /// Currently active alerts across all budgets.
    pub fn alerts(&self) -> Result<Vec<Alert>> {
        Ok(evaluate_alerts(&self.budgets()?))
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let mut all = self.transactions()?;
        let tx = transactions::add_transaction(&all, draft)?;
        all.push(tx.clone());
        self.transactions_changed(&all)?;
        info!(id = tx.id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        Ok(tx)
    }

    pub fn update_transaction(&mut self, id: i64, patch: TransactionPatch) -> Result<()> {
        let all = self.transactions()?;
        let updated = transactions::update_transaction(&all, id, patch)?;
        self.transactions_changed(&updated)?;
        info!(id, "transaction updated");
        Ok(())
    }

    pub fn categorize(&mut self, id: i64, category: &str) -> Result<()> {
        let all = self.transactions()?;
        let updated = transactions::categorize(&all, id, category)?;
        self.transactions_changed(&updated)?;
        info!(id, category, "transaction categorized");
        Ok(())
    }

    /// Amount is in USD. Alerts for the new budget are dispatched right away
    /// when existing spend already crosses a threshold.
    pub fn create_budget(&mut self, category: &str, amount: Decimal, month: &str) -> Result<Budget> {
        let mut budgets = self.budgets()?;
        let txs = self.transactions()?;
        let budget = aggregator::create_budget(&mut budgets, &txs, category, amount, month)?;
        BudgetStore::append(&mut self.store, budget.clone())?;
        info!(id = budget.id, category = %budget.category, month = %budget.month, "budget created");
        for alert in evaluate_alerts(std::slice::from_ref(&budget)) {
            self.dispatch(&alert);
        }
        Ok(budget)
    }

    pub fn delete_budget(&mut self, id: i64) -> Result<()> {
        BudgetStore::remove(&mut self.store, id)?;
        info!(id, "budget deleted");
        Ok(())
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<Goal> {
        let mut all = self.goals()?;
        let goal = goals::add_goal(&all, draft)?;
        all.push(goal.clone());
        GoalStore::replace_all(&mut self.store, &all)?;
        info!(id = goal.id, name = %goal.name, "goal added");
        Ok(goal)
    }

    pub fn contribute(&mut self, id: i64, amount: Decimal) -> Result<Goal> {
        let updated = goals::contribute(&self.goals()?, id, amount)?;
        GoalStore::replace_all(&mut self.store, &updated)?;
        info!(id, amount = %amount, "goal contribution");
        updated
            .into_iter()
            .find(|g| g.id == id)
            .ok_or(CoreError::NotFound { kind: "Goal", id })
    }

    pub fn delete_goal(&mut self, id: i64) -> Result<()> {
        let remaining = goals::delete_goal(&self.goals()?, id);
        GoalStore::replace_all(&mut self.store, &remaining)?;
        info!(id, "goal deleted");
        Ok(())
    }

    /// Recompute every budget against `txs`, commit both collections, then
    /// dispatch alerts that became active with this change. Returns the
    /// dispatched alerts.
    fn transactions_changed(&mut self, txs: &[Transaction]) -> Result<Vec<Alert>> {
        let budgets = self.budgets()?;
        let before = evaluate_alerts(&budgets);
        let recomputed = recompute_spent(&budgets, txs)?;
        self.store.commit(txs, &recomputed)?;
        self.sink.budgets_recomputed(&recomputed);

        let raised = newly_raised(&before, &evaluate_alerts(&recomputed));
        for alert in &raised {
            self.dispatch(alert);
        }
        Ok(raised)
    }

    fn dispatch(&mut self, alert: &Alert) {
        warn!(
            budget = alert.budget_id,
            kind = %alert.kind,
            category = %alert.category,
            month = %alert.month,
            "budget alert"
        );
        self.sink.notify(alert);
    }
}
