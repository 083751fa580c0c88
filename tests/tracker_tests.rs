// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chaching::models::{
    AlertDetail, AlertKind, GoalDraft, TransactionDraft, TransactionPatch, TxType,
};
use chaching::notify::CollectingSink;
use chaching::store::{
    BUDGETS_KEY, BlobStore, JsonRepository, MemoryStore, SqliteStore, TransactionSource,
};
use chaching::tracker::Tracker;
use chaching::{CoreError, db};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn food(day: &str, amount: i64) -> TransactionDraft {
    TransactionDraft {
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        description: "Groceries".into(),
        amount: Decimal::new(amount, 0),
        category: Some("Food".into()),
        kind: TxType::Expense,
    }
}

fn tracker() -> Tracker<JsonRepository<MemoryStore>, CollectingSink> {
    Tracker::new(JsonRepository::new(MemoryStore::new()), CollectingSink::default())
}

#[test]
fn recompute_runs_once_per_transaction_change() {
    let mut t = tracker();
    t.create_budget("Food", Decimal::new(500, 0), "2024-06").unwrap();
    assert_eq!(t.sink().recomputes, 0);

    t.add_transaction(food("2024-06-05", 400)).unwrap();
    assert_eq!(t.sink().recomputes, 1);
    assert_eq!(t.budgets().unwrap()[0].spent, Decimal::new(400, 0));
    assert!(t.sink().alerts.is_empty());

    t.add_transaction(food("2024-06-10", 150)).unwrap();
    assert_eq!(t.sink().recomputes, 2);
    assert_eq!(t.budgets().unwrap()[0].spent, Decimal::new(550, 0));
    assert_eq!(t.sink().alerts.len(), 1);
    assert_eq!(t.sink().alerts[0].kind, AlertKind::OverLimit);
    assert_eq!(
        t.sink().alerts[0].detail,
        AlertDetail::OverBy(Decimal::new(50, 0))
    );

    // still over limit, nothing new to report
    t.add_transaction(food("2024-06-11", 5)).unwrap();
    assert_eq!(t.sink().recomputes, 3);
    assert_eq!(t.sink().alerts.len(), 1);
    assert_eq!(t.alerts().unwrap().len(), 1);
}

#[test]
fn categorizing_history_moves_spend() {
    let mut t = tracker();
    let mut draft = food("2024-06-05", 95);
    draft.category = None;
    let tx = t.add_transaction(draft).unwrap();
    t.create_budget("Food", Decimal::new(100, 0), "2024-06").unwrap();
    assert_eq!(t.budgets().unwrap()[0].spent, Decimal::ZERO);

    t.categorize(tx.id, "Food").unwrap();
    assert_eq!(t.budgets().unwrap()[0].spent, Decimal::new(95, 0));
    assert_eq!(t.sink().alerts.len(), 1);
    assert_eq!(t.sink().alerts[0].kind, AlertKind::NearLimit);
    assert_eq!(
        t.sink().alerts[0].detail,
        AlertDetail::PercentUsed(Decimal::new(95, 0))
    );
}

#[test]
fn failed_mutations_leave_state_alone() {
    let mut t = tracker();
    t.add_transaction(food("2024-06-05", 10)).unwrap();
    let before = t.transactions().unwrap();

    assert!(matches!(t.categorize(1, ""), Err(CoreError::Validation(_))));
    assert!(matches!(
        t.add_transaction(food("2024-06-05", 0)),
        Err(CoreError::Validation(_))
    ));
    assert_eq!(t.transactions().unwrap(), before);
    assert_eq!(t.sink().recomputes, 1);

    t.create_budget("Food", Decimal::new(50, 0), "2024-06").unwrap();
    assert!(matches!(
        t.create_budget("Food", Decimal::new(80, 0), "2024-06"),
        Err(CoreError::DuplicateBudget { .. })
    ));
    assert_eq!(t.budgets().unwrap().len(), 1);
}

#[test]
fn budget_created_over_limit_alerts_immediately() {
    let mut t = tracker();
    t.add_transaction(food("2024-06-05", 120)).unwrap();
    let b = t.create_budget("Food", Decimal::new(100, 0), "2024-06").unwrap();
    assert_eq!(b.spent, Decimal::new(120, 0));
    assert_eq!(t.sink().alerts.len(), 1);
    assert_eq!(t.sink().alerts[0].kind, AlertKind::OverLimit);

    t.delete_budget(b.id).unwrap();
    t.delete_budget(b.id).unwrap();
    assert!(t.budgets().unwrap().is_empty());
    assert!(t.alerts().unwrap().is_empty());
}

#[test]
fn goals_do_not_touch_budgets() {
    let mut t = tracker();
    t.create_budget("Food", Decimal::new(100, 0), "2024-06").unwrap();
    let g = t
        .add_goal(GoalDraft {
            name: "Vacation".into(),
            target: Decimal::new(2000, 0),
            current: None,
            deadline: None,
            notes: Some("Lisbon".into()),
        })
        .unwrap();
    let g = t.contribute(g.id, Decimal::new(2500, 0)).unwrap();
    assert_eq!(g.current, Decimal::new(2000, 0));
    assert_eq!(t.sink().recomputes, 0);
    t.delete_goal(g.id).unwrap();
    assert!(t.goals().unwrap().is_empty());
}

#[test]
fn budgets_persist_as_json_blob() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chaching.sqlite");
    {
        let conn = db::open_at(&path).unwrap();
        let mut t = Tracker::new(
            JsonRepository::new(SqliteStore::new(&conn)),
            CollectingSink::default(),
        );
        t.create_budget("Rent", Decimal::new(1200, 0), "2024-06").unwrap();
        t.add_transaction(TransactionDraft {
            category: Some("Rent".into()),
            ..food("2024-06-01", 1200)
        })
        .unwrap();
    }

    let conn = db::open_at(&path).unwrap();
    let store = SqliteStore::new(&conn);
    let raw = store.get(BUDGETS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"category\":\"Rent\""));

    let t = Tracker::new(JsonRepository::new(store), CollectingSink::default());
    let budgets = t.budgets().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].spent, Decimal::new(1200, 0));
    assert_eq!(t.alerts().unwrap()[0].kind, AlertKind::OverLimit);
}

#[test]
fn moving_a_transaction_moves_its_spend() {
    let mut t = tracker();
    let june = t.create_budget("Food", Decimal::new(100, 0), "2024-06").unwrap();
    let july = t.create_budget("Food", Decimal::new(100, 0), "2024-07").unwrap();
    let tx = t.add_transaction(food("2024-06-28", 95)).unwrap();
    assert_eq!(t.sink().recomputes, 1);
    assert_eq!(t.sink().alerts.len(), 1);
    assert_eq!(t.sink().alerts[0].budget_id, june.id);

    t.update_transaction(
        tx.id,
        TransactionPatch {
            date: Some(NaiveDate::from_ymd_opt(2024, 7, 2).unwrap()),
            ..Default::default()
        },
    )
    .unwrap();

    let budgets = t.budgets().unwrap();
    assert_eq!(budgets[0].spent, Decimal::ZERO);
    assert_eq!(budgets[1].spent, Decimal::new(95, 0));
    assert_eq!(t.sink().recomputes, 2);
    assert_eq!(t.sink().alerts.len(), 2);
    assert_eq!(t.sink().alerts[1].budget_id, july.id);
    assert_eq!(t.sink().alerts[1].kind, AlertKind::NearLimit);

    // recategorizing takes it out of Food entirely
    t.update_transaction(
        tx.id,
        TransactionPatch {
            category: Some("Travel".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(t.budgets().unwrap().iter().all(|b| b.spent.is_zero()));
    assert_eq!(t.sink().recomputes, 3);
    assert_eq!(t.sink().alerts.len(), 2);
}

#[test]
fn overflowing_spend_is_rejected_and_store_stays_usable() {
    let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
    let mut t = tracker();
    t.create_budget("Food", Decimal::new(500, 0), "2024-06").unwrap();
    t.add_transaction(TransactionDraft {
        amount: huge,
        ..food("2024-06-01", 1)
    })
    .unwrap();

    let err = t
        .add_transaction(TransactionDraft {
            amount: huge,
            ..food("2024-06-02", 1)
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(t.transactions().unwrap().len(), 1);
    assert_eq!(t.sink().recomputes, 1);

    let tx = t.add_transaction(food("2024-06-03", 10)).unwrap();
    assert_eq!(tx.id, 2);
    assert_eq!(t.budgets().unwrap()[0].spent, huge + Decimal::TEN);
}

#[test]
fn failed_budget_write_rolls_back_transaction() {
    let conn = db::open_in_memory().unwrap();
    let mut t = Tracker::new(
        JsonRepository::new(SqliteStore::new(&conn)),
        CollectingSink::default(),
    );
    t.create_budget("Food", Decimal::new(100, 0), "2024-06").unwrap();

    conn.execute_batch(
        "CREATE TRIGGER lock_budgets_ins BEFORE INSERT ON blobs WHEN NEW.key = 'budgets'
         BEGIN SELECT RAISE(ABORT, 'budgets locked'); END;
         CREATE TRIGGER lock_budgets_upd BEFORE UPDATE ON blobs WHEN NEW.key = 'budgets'
         BEGIN SELECT RAISE(ABORT, 'budgets locked'); END;",
    )
    .unwrap();

    let err = t.add_transaction(food("2024-06-05", 40)).unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)));
    assert!(t.transactions().unwrap().is_empty());
    assert_eq!(t.budgets().unwrap()[0].spent, Decimal::ZERO);
    assert_eq!(t.sink().recomputes, 0);

    conn.execute_batch("DROP TRIGGER lock_budgets_ins; DROP TRIGGER lock_budgets_upd;")
        .unwrap();
    let tx = t.add_transaction(food("2024-06-05", 40)).unwrap();
    assert_eq!(tx.id, 1);
    assert_eq!(t.transactions().unwrap().len(), 1);
    assert_eq!(t.budgets().unwrap()[0].spent, Decimal::new(40, 0));
}

#[test]
fn repository_append_assigns_ids() {
    let mut repo = JsonRepository::new(MemoryStore::new());
    let a = TransactionSource::append(&mut repo, food("2024-06-01", 5)).unwrap();
    let b = TransactionSource::append(&mut repo, food("2024-06-02", 7)).unwrap();
    assert_eq!((a.id, b.id), (1, 2));
    assert!(TransactionSource::append(&mut repo, food("2024-06-03", 0)).is_err());
    assert_eq!(TransactionSource::list(&repo).unwrap().len(), 2);
}
