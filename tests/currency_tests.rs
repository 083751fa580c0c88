// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chaching::currency::{CurrencyTable, from_display, to_display};
use chaching::models::{Alert, AlertDetail, AlertKind};
use chaching::{cli, commands, db, utils};
use rust_decimal::Decimal;

#[test]
fn usd_and_jpy_formatting() {
    let hundred = Decimal::new(100, 0);
    assert_eq!(
        to_display(hundred, Decimal::ONE, "$", "USD").unwrap(),
        "$100.00"
    );
    assert_eq!(
        to_display(hundred, Decimal::new(15723, 2), "¥", "JPY").unwrap(),
        "¥15723"
    );
    assert_eq!(
        to_display(Decimal::new(1999, 2), Decimal::new(93, 2), "€", "EUR").unwrap(),
        "€18.59"
    );
}

#[test]
fn display_entry_converts_back_to_usd() {
    let inr = CurrencyTable::default().get("INR").unwrap();
    let usd = inr.to_usd(Decimal::new(8345, 0)).unwrap();
    assert_eq!(format!("{:.2}", usd.round_dp(2)), "100.00");
    assert!(from_display(Decimal::ONE, Decimal::ZERO).is_err());
}

#[test]
fn over_limit_message_uses_display_currency() {
    let alert = Alert {
        budget_id: 1,
        kind: AlertKind::OverLimit,
        category: "Food".into(),
        month: "2024-06".into(),
        detail: AlertDetail::OverBy(Decimal::new(50, 0)),
    };
    let gbp = CurrencyTable::default().get("GBP").unwrap();
    assert_eq!(
        alert.message(&gbp).unwrap(),
        "Over budget by £39.50 on Food for 2024-06!"
    );
}

#[test]
fn display_currency_setting_round_trips() {
    let conn = db::open_in_memory().unwrap();
    assert_eq!(utils::get_display_currency(&conn).unwrap(), "USD");

    let matches =
        cli::build_cli().get_matches_from(["chaching", "currency", "set", "--code", "jpy"]);
    if let Some(("currency", m)) = matches.subcommand() {
        commands::currency::handle(&conn, m).unwrap();
    } else {
        panic!("currency command not parsed");
    }
    let c = utils::display_currency(&conn, &CurrencyTable::default()).unwrap();
    assert_eq!(c.code, "JPY");
    assert_eq!(c.format(Decimal::new(100, 0)).unwrap(), "¥15723");

    let matches =
        cli::build_cli().get_matches_from(["chaching", "currency", "set", "--code", "XYZ"]);
    if let Some(("currency", m)) = matches.subcommand() {
        assert!(commands::currency::handle(&conn, m).is_err());
    }
    assert_eq!(utils::get_display_currency(&conn).unwrap(), "JPY");
}
