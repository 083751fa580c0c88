// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display-currency conversion. Everything is stored in USD; these helpers
//! only ever produce strings or converted copies for presentation and input.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const USD: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub symbol: String,
    pub rate: Decimal, // units per 1 USD
}

/// One resolved display currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub rate: Decimal,
}

impl Currency {
    pub fn usd() -> Self {
        Currency {
            code: USD.to_string(),
            symbol: "$".to_string(),
            rate: Decimal::ONE,
        }
    }

    pub fn format(&self, amount_usd: Decimal) -> Result<String> {
        to_display(amount_usd, self.rate, &self.symbol, &self.code)
    }

    pub fn to_usd(&self, amount: Decimal) -> Result<Decimal> {
        from_display(amount, self.rate)
    }
}

/// Mapping from currency code to symbol and rate, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTable(BTreeMap<String, CurrencyInfo>);

impl CurrencyTable {
    pub fn new() -> Self {
        CurrencyTable(BTreeMap::new())
    }

    pub fn insert(&mut self, code: &str, symbol: &str, rate: Decimal) {
        self.0.insert(
            code.to_uppercase(),
            CurrencyInfo {
                symbol: symbol.to_string(),
                rate,
            },
        );
    }

    pub fn get(&self, code: &str) -> Option<Currency> {
        let code = code.trim().to_uppercase();
        self.0.get(&code).map(|info| Currency {
            code,
            symbol: info.symbol.clone(),
            rate: info.rate,
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(&code.trim().to_uppercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CurrencyInfo)> {
        self.0.iter()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let mut t = CurrencyTable::new();
        t.insert("USD", "$", Decimal::ONE);
        t.insert("EUR", "€", Decimal::new(93, 2));
        t.insert("GBP", "£", Decimal::new(79, 2));
        t.insert("INR", "₹", Decimal::new(8345, 2));
        t.insert("JPY", "¥", Decimal::new(15723, 2));
        t
    }
}

pub fn convert(amount_usd: Decimal, rate: Decimal) -> Result<Decimal> {
    amount_usd.checked_mul(rate).ok_or_else(|| {
        CoreError::validation(format!(
            "Amount {} is out of range at rate {}",
            amount_usd, rate
        ))
    })
}

/// Format a USD amount in a display currency. JPY has no minor unit and is
/// rounded to a whole number; everything else gets exactly two decimals.
pub fn to_display(
    amount_usd: Decimal,
    rate: Decimal,
    symbol: &str,
    code: &str,
) -> Result<String> {
    let converted = convert(amount_usd, rate)?;
    if code.eq_ignore_ascii_case("JPY") {
        let whole = converted.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        return Ok(format!("{}{:.0}", symbol, whole));
    }
    let cents = converted.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{}{:.2}", symbol, cents))
}

/// Turn an amount typed in a display currency back into USD.
pub fn from_display(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    if rate <= Decimal::ZERO {
        return Err(CoreError::validation(format!(
            "Invalid currency rate {}, expected a positive number",
            rate
        )));
    }
    amount.checked_div(rate).ok_or_else(|| {
        CoreError::validation(format!("Amount {} is out of range at rate {}", amount, rate))
    })
}
