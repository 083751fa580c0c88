// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::currency::CurrencyTable;
use crate::utils::{display_currency, pretty_table, set_display_currency};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let table = CurrencyTable::default();
    match m.subcommand() {
        Some(("set", sub)) => {
            let code = required(sub, "code")?.trim().to_uppercase();
            if !table.contains(&code) {
                bail!("Unknown currency '{}'", code);
            }
            set_display_currency(conn, &code)?;
            println!("Display currency set to {}", code);
        }
        Some(("list", _)) => list(conn, &table)?,
        Some(("show", _)) => {
            let c = display_currency(conn, &table)?;
            println!("{} ({}), rate {} per USD", c.code, c.symbol, c.rate);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, table: &CurrencyTable) -> Result<()> {
    let current = display_currency(conn, table)?;
    let data = table
        .iter()
        .map(|(code, info)| {
            vec![
                code.clone(),
                info.symbol.clone(),
                info.rate.to_string(),
                if *code == current.code { "*".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Code", "Symbol", "Rate (per USD)", "Active"], data)
    );
    Ok(())
}
