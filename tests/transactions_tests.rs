// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chaching::models::{TransactionDraft, TransactionPatch, TxType};
use chaching::transactions::{
    TimePeriod, add_transaction, categorize, filter_by_period, uncategorized, update_transaction,
};
use chaching::{CoreError, cli, commands::transactions, db};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(day: &str, description: &str, amount: i64, category: Option<&str>) -> TransactionDraft {
    TransactionDraft {
        date: date(day),
        description: description.to_string(),
        amount: Decimal::new(amount, 2),
        category: category.map(String::from),
        kind: TxType::Expense,
    }
}

#[test]
fn ids_are_max_plus_one() {
    let mut all = Vec::new();
    for i in 0..3 {
        let tx = add_transaction(&all, draft("2023-05-01", "Merchant", 1000 + i, None)).unwrap();
        all.push(tx);
    }
    assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);

    all.remove(0);
    let tx = add_transaction(&all, draft("2023-05-02", "Merchant", 500, None)).unwrap();
    assert_eq!(tx.id, 4);
}

#[test]
fn rejects_non_positive_amounts_and_blank_descriptions() {
    let err = add_transaction(&[], draft("2023-05-01", "Coffee", 0, None)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    let err = add_transaction(&[], draft("2023-05-01", "Coffee", -499, None)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    let err = add_transaction(&[], draft("2023-05-01", "   ", 499, None)).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn categorize_moves_out_of_uncategorized() {
    let a = add_transaction(&[], draft("2023-05-01", "Merchant 1", 4599, Some(""))).unwrap();
    let b = add_transaction(&[a.clone()], draft("2023-05-02", "Merchant 2", 12200, None)).unwrap();
    let all = vec![a, b];
    assert_eq!(uncategorized(&all).len(), 2);

    let all = categorize(&all, 1, " Food ").unwrap();
    let pending = uncategorized(&all);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 2);
    assert_eq!(all[0].category(), Some("Food"));
}

#[test]
fn categorize_with_empty_category_fails() {
    let a = add_transaction(&[], draft("2023-05-01", "Merchant 1", 4599, None)).unwrap();
    let all = vec![a];
    assert!(matches!(
        categorize(&all, 1, "  "),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        categorize(&all, 9, "Food"),
        Err(CoreError::NotFound { id: 9, .. })
    ));
}

#[test]
fn update_applies_only_given_fields() {
    let a = add_transaction(&[], draft("2023-05-01", "Merchant 1", 4599, Some("Food"))).unwrap();
    let all = update_transaction(
        &[a],
        1,
        TransactionPatch {
            amount: Some(Decimal::new(5000, 2)),
            kind: Some(TxType::Income),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(all[0].amount, Decimal::new(50, 0));
    assert_eq!(all[0].kind, TxType::Income);
    assert_eq!(all[0].description, "Merchant 1");
    assert_eq!(all[0].category(), Some("Food"));

    let err = update_transaction(
        &all,
        1,
        TransactionPatch {
            amount: Some(Decimal::ZERO),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn period_filters() {
    let mut all = Vec::new();
    for day in ["2024-06-20", "2024-06-14", "2024-05-20", "2024-05-19"] {
        let tx = add_transaction(&all, draft(day, "Merchant", 100, None)).unwrap();
        all.push(tx);
    }
    let today = date("2024-06-20");
    assert_eq!(filter_by_period(&all, TimePeriod::All, today).len(), 4);
    assert_eq!(filter_by_period(&all, TimePeriod::Last7Days, today).len(), 2);
    assert_eq!(filter_by_period(&all, TimePeriod::LastMonth, today).len(), 3);
    assert_eq!("7days".parse::<TimePeriod>().unwrap(), TimePeriod::Last7Days);
    assert!("fortnight".parse::<TimePeriod>().is_err());
}

#[test]
fn cli_add_then_list_with_limit() {
    let conn = db::open_in_memory().unwrap();
    for day in ["2025-01-01", "2025-01-02", "2025-01-03"] {
        let matches = cli::build_cli().get_matches_from([
            "chaching",
            "tx",
            "add",
            "--date",
            day,
            "--description",
            "P",
            "--amount",
            "10",
            "--category",
            "Food",
        ]);
        if let Some(("tx", tx_m)) = matches.subcommand() {
            transactions::handle(&conn, tx_m).unwrap();
        } else {
            panic!("no tx subcommand");
        }
    }

    let matches = cli::build_cli().get_matches_from(["chaching", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
            assert_eq!(rows[0].id, 3);
            assert_eq!(rows[0].display, "$10.00");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}
