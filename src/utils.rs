// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::currency::{Currency, CurrencyTable, USD};
use crate::models::is_month_key;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    if !is_month_key(s) {
        return Err(anyhow!("Invalid month '{}', expected YYYY-MM", s));
    }
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn current_month() -> String {
    today().format("%Y-%m").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Display currency settings
pub fn get_display_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='display_currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| USD.to_string()))
}

pub fn set_display_currency(conn: &Connection, code: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('display_currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![code],
    )?;
    Ok(())
}

/// Resolve the configured display currency against `table`, falling back to
/// USD when the stored code is no longer in the table.
pub fn display_currency(conn: &Connection, table: &CurrencyTable) -> Result<Currency> {
    let code = get_display_currency(conn)?;
    match table.get(&code) {
        Some(c) => Ok(c),
        None => {
            tracing::warn!(code = %code, "unknown display currency, using USD");
            Ok(Currency::usd())
        }
    }
}
