// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{BudgetStatus, budget_status, evaluate_alerts};
use crate::commands::{open_tracker, required, required_id};
use crate::currency::Currency;
use crate::models::Alert;
use crate::utils::{current_month, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::RoundingStrategy;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("alerts", sub)) => alerts(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> Result<Option<String>> {
    sub.get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let category = required(sub, "category")?;
    let entered = parse_decimal(required(sub, "amount")?)?;
    let month = month_arg(sub)?.unwrap_or_else(current_month);

    let (mut tracker, currency) = open_tracker(conn)?;
    // Entered in the display currency, stored in USD
    let amount = currency.to_usd(entered)?;
    let budget = tracker.create_budget(category, amount, &month)?;
    println!(
        "Budget #{} set for {} / {} = {} (spent so far {})",
        budget.id,
        budget.month,
        budget.category,
        currency.format(budget.amount)?,
        currency.format(budget.spent)?
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let (mut tracker, _) = open_tracker(conn)?;
    tracker.delete_budget(id)?;
    println!("Removed budget #{}", id);
    Ok(())
}

/// Budget rows for `month` (all months when `None`).
pub fn report_rows(conn: &Connection, month: Option<&str>) -> Result<(Vec<BudgetStatus>, Currency)> {
    let (tracker, currency) = open_tracker(conn)?;
    Ok((budget_status(&tracker.budgets()?, month), currency))
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let (rows, currency) = report_rows(conn, month.as_deref())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let data = rows
        .into_iter()
        .map(|r| {
            Ok(vec![
                r.id.to_string(),
                r.month,
                r.category,
                currency.format(r.amount)?,
                currency.format(r.spent)?,
                format!(
                    "{}%",
                    r.display_percent
                        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                ),
                r.alert.map(|k| k.to_string()).unwrap_or_default(),
            ])
        })
        .collect::<crate::Result<Vec<_>>>()?;
    println!(
        "{}",
        pretty_table(
            &["ID", "Month", "Category", "Budget", "Spent", "Used", "Status"],
            data
        )
    );
    Ok(())
}

/// Active alerts, restricted to `month` when given.
pub fn active_alerts(conn: &Connection, month: Option<&str>) -> Result<(Vec<Alert>, Currency)> {
    let (tracker, currency) = open_tracker(conn)?;
    let budgets: Vec<_> = tracker
        .budgets()?
        .into_iter()
        .filter(|b| month.is_none_or(|m| b.month == m))
        .collect();
    Ok((evaluate_alerts(&budgets), currency))
}

fn alerts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let (alerts, currency) = active_alerts(conn, month.as_deref())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &alerts)? {
        return Ok(());
    }
    if alerts.is_empty() {
        println!("All budgets are below 90% of their limit");
        return Ok(());
    }
    let data = alerts
        .iter()
        .map(|a| {
            Ok(vec![
                a.kind.to_string(),
                a.month.clone(),
                a.category.clone(),
                a.message(&currency)?,
            ])
        })
        .collect::<crate::Result<Vec<_>>>()?;
    println!(
        "{}",
        pretty_table(&["Kind", "Month", "Category", "Message"], data)
    );
    Ok(())
}
