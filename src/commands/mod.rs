// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod currency;
pub mod goals;
pub mod transactions;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::currency::{Currency, CurrencyTable};
use crate::notify::ConsoleSink;
use crate::store::{JsonRepository, SqliteStore};
use crate::tracker::Tracker;
use crate::utils::display_currency;

pub type CliTracker<'c> = Tracker<JsonRepository<SqliteStore<'c>>, ConsoleSink>;

/// Tracker over the on-disk blobs, printing alerts in the display currency.
pub fn open_tracker(conn: &Connection) -> Result<(CliTracker<'_>, Currency)> {
    let currency = display_currency(conn, &CurrencyTable::default())?;
    let tracker = Tracker::new(
        JsonRepository::new(SqliteStore::new(conn)),
        ConsoleSink::new(currency.clone()),
    );
    Ok((tracker, currency))
}

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn required_id(sub: &clap::ArgMatches) -> Result<i64> {
    sub.get_one::<i64>("id").copied().context("--id is required")
}
