// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types surfaced by the budget, transaction and goal core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A budget already exists for this category and month.
    #[error("A budget for {category} already exists for {month}")]
    DuplicateBudget { category: String, month: String },

    /// User input rejected before any state changed.
    #[error("{0}")]
    Validation(String),

    /// Budget with a zero cap. Skipped during alert evaluation, never returned to callers.
    #[error("Budget {id} has a zero amount")]
    DegenerateBudget { id: i64 },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
