// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod currency;
pub mod db;
pub mod error;
pub mod goals;
pub mod models;
pub mod notify;
pub mod store;
pub mod tracker;
pub mod transactions;
pub mod utils;

pub use error::{CoreError, Result};
