// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence collaborators. Collections are kept as JSON blobs in a plain
//! key-value store; the typed traits on top are what the tracker depends on.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::aggregator;
use crate::error::Result;
use crate::models::{Budget, Goal, Transaction, TransactionDraft};
use crate::transactions::add_transaction;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const BUDGETS_KEY: &str = "budgets";
pub const GOALS_KEY: &str = "financialGoals";

pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Write several keys as one unit. Backends whose writes can fail midway
    /// override this so that a failure leaves every key untouched.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Blob store backed by the `blobs` table, see `db::init_schema`.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }
}

impl BlobStore for SqliteStore<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        upsert(self.conn, key, value)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            upsert(&tx, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO blobs(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub trait TransactionSource {
    fn list(&self) -> Result<Vec<Transaction>>;
    /// Validate and store a new transaction, assigning the next id.
    fn append(&mut self, draft: TransactionDraft) -> Result<Transaction>;
    fn replace_all(&mut self, transactions: &[Transaction]) -> Result<()>;
}

pub trait BudgetStore {
    fn list(&self) -> Result<Vec<Budget>>;
    fn append(&mut self, budget: Budget) -> Result<()>;
    fn remove(&mut self, id: i64) -> Result<()>;
    /// Persist a recomputed budget collection wholesale.
    fn replace_all(&mut self, budgets: &[Budget]) -> Result<()>;
}

pub trait GoalStore {
    fn list(&self) -> Result<Vec<Goal>>;
    fn replace_all(&mut self, goals: &[Goal]) -> Result<()>;
}

/// Stores that persist a changed transaction set and its recomputed budgets
/// together: either both land or neither does.
pub trait Ledger: TransactionSource + BudgetStore + GoalStore {
    fn commit(&mut self, transactions: &[Transaction], budgets: &[Budget]) -> Result<()>;
}

/// Typed collections serialized as JSON arrays into any [`BlobStore`].
#[derive(Debug, Default, Clone)]
pub struct JsonRepository<S> {
    blobs: S,
}

impl<S: BlobStore> JsonRepository<S> {
    pub fn new(blobs: S) -> Self {
        JsonRepository { blobs }
    }

    pub fn into_inner(self) -> S {
        self.blobs
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.blobs.get(key)? {
            Some(s) if !s.trim().is_empty() => Ok(serde_json::from_str(&s)?),
            _ => Ok(Vec::new()),
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let s = serde_json::to_string(items)?;
        self.blobs.set(key, &s)
    }
}

impl<S: BlobStore> TransactionSource for JsonRepository<S> {
    fn list(&self) -> Result<Vec<Transaction>> {
        self.load(TRANSACTIONS_KEY)
    }

    fn append(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let mut all: Vec<Transaction> = self.load(TRANSACTIONS_KEY)?;
        let tx = add_transaction(&all, draft)?;
        all.push(tx.clone());
        self.save(TRANSACTIONS_KEY, &all)?;
        Ok(tx)
    }

    fn replace_all(&mut self, transactions: &[Transaction]) -> Result<()> {
        self.save(TRANSACTIONS_KEY, transactions)
    }
}

impl<S: BlobStore> BudgetStore for JsonRepository<S> {
    fn list(&self) -> Result<Vec<Budget>> {
        self.load(BUDGETS_KEY)
    }

    fn append(&mut self, budget: Budget) -> Result<()> {
        let mut all: Vec<Budget> = self.load(BUDGETS_KEY)?;
        all.push(budget);
        self.save(BUDGETS_KEY, &all)
    }

    fn remove(&mut self, id: i64) -> Result<()> {
        let all: Vec<Budget> = self.load(BUDGETS_KEY)?;
        self.save(BUDGETS_KEY, &aggregator::delete_budget(&all, id))
    }

    fn replace_all(&mut self, budgets: &[Budget]) -> Result<()> {
        self.save(BUDGETS_KEY, budgets)
    }
}

impl<S: BlobStore> GoalStore for JsonRepository<S> {
    fn list(&self) -> Result<Vec<Goal>> {
        self.load(GOALS_KEY)
    }

    fn replace_all(&mut self, goals: &[Goal]) -> Result<()> {
        self.save(GOALS_KEY, goals)
    }
}

impl<S: BlobStore> Ledger for JsonRepository<S> {
    fn commit(&mut self, transactions: &[Transaction], budgets: &[Budget]) -> Result<()> {
        let txs = serde_json::to_string(transactions)?;
        let budgets = serde_json::to_string(budgets)?;
        self.blobs
            .set_many(&[(TRANSACTIONS_KEY, txs.as_str()), (BUDGETS_KEY, budgets.as_str())])
    }
}
