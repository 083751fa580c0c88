// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{open_tracker, required, required_id};
use crate::currency::Currency;
use crate::models::{Transaction, TransactionDraft, TransactionPatch, TxType};
use crate::transactions::{TimePeriod, filter_by_period, uncategorized};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("categorize", sub)) => categorize(conn, sub)?,
        Some(("uncategorized", sub)) => list_uncategorized(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn tx_type(sub: &clap::ArgMatches) -> Result<Option<TxType>> {
    Ok(match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<TxType>()?),
        None => None,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let description = required(sub, "description")?.clone();
    let amount = parse_decimal(required(sub, "amount")?)?;
    let kind = tx_type(sub)?.unwrap_or_default();
    let category = sub.get_one::<String>("category").cloned();

    let (mut tracker, currency) = open_tracker(conn)?;
    let tx = tracker.add_transaction(TransactionDraft {
        date,
        description,
        amount,
        category,
        kind,
    })?;
    println!(
        "Recorded {} #{} of {} on {} ('{}')",
        tx.kind,
        tx.id,
        currency.format(tx.amount)?,
        tx.date,
        tx.description
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let patch = TransactionPatch {
        date: sub.get_one::<String>("date").map(|d| parse_date(d)).transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|a| parse_decimal(a))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        kind: tx_type(sub)?,
    };
    let (mut tracker, _) = open_tracker(conn)?;
    tracker.update_transaction(id, patch)?;
    println!("Updated transaction #{}", id);
    Ok(())
}

fn categorize(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let category = required(sub, "category")?;
    let (mut tracker, _) = open_tracker(conn)?;
    tracker.categorize(id, category)?;
    println!(
        "Transaction #{} has been categorized as {}",
        id,
        category.trim()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    print_rows(json_flag, jsonl_flag, &data)
}

fn list_uncategorized(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (tracker, currency) = open_tracker(conn)?;
    let pending = uncategorized(&tracker.transactions()?);
    let data = pending
        .iter()
        .rev()
        .map(|t| TransactionRow::new(t, &currency))
        .collect::<crate::Result<Vec<_>>>()?;
    print_rows(sub.get_flag("json"), sub.get_flag("jsonl"), &data)
}

fn print_rows(json_flag: bool, jsonl_flag: bool, data: &[TransactionRow]) -> Result<()> {
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.display.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String, // USD
    pub display: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
}

impl TransactionRow {
    fn new(t: &Transaction, currency: &Currency) -> crate::Result<Self> {
        Ok(TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description.clone(),
            amount: t.amount.to_string(),
            display: currency.format(t.amount)?,
            kind: t.kind.to_string(),
            category: t.category().unwrap_or_default().to_string(),
        })
    }
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let period = match sub.get_one::<String>("period") {
        Some(p) => p.parse::<TimePeriod>()?,
        None => TimePeriod::All,
    };
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let category = sub.get_one::<String>("category").map(|c| c.trim().to_string());

    let (tracker, currency) = open_tracker(conn)?;
    let mut txs = filter_by_period(&tracker.transactions()?, period, today());
    txs.retain(|t| month.as_ref().is_none_or(|m| &t.month() == m));
    txs.retain(|t| category.as_deref().is_none_or(|c| t.category() == Some(c)));
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }
    let rows = txs
        .iter()
        .map(|t| TransactionRow::new(t, &currency))
        .collect::<crate::Result<Vec<_>>>()?;
    Ok(rows)
}
