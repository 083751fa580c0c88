// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::warn;

use crate::currency::Currency;
use crate::models::{Alert, AlertKind, Budget};

/// Receives alerts raised by the tracker and is told whenever budgets were
/// recomputed after the transaction set changed.
pub trait NotificationSink {
    fn notify(&mut self, alert: &Alert);

    fn budgets_recomputed(&mut self, _budgets: &[Budget]) {}
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn notify(&mut self, alert: &Alert) {
        (**self).notify(alert)
    }

    fn budgets_recomputed(&mut self, budgets: &[Budget]) {
        (**self).budgets_recomputed(budgets)
    }
}

/// Keeps everything it receives. Handy for tests and batch callers.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub alerts: Vec<Alert>,
    pub recomputes: usize,
}

impl NotificationSink for CollectingSink {
    fn notify(&mut self, alert: &Alert) {
        self.alerts.push(alert.clone());
    }

    fn budgets_recomputed(&mut self, _budgets: &[Budget]) {
        self.recomputes += 1;
    }
}

/// Prints alerts to stdout in the display currency.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    currency: Currency,
}

impl ConsoleSink {
    pub fn new(currency: Currency) -> Self {
        ConsoleSink { currency }
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, alert: &Alert) {
        let marker = match alert.kind {
            AlertKind::NearLimit => "⚠",
            AlertKind::OverLimit => "✖",
        };
        match alert.message(&self.currency) {
            Ok(text) => println!("{} {}", marker, text),
            Err(err) => warn!(budget = alert.budget_id, error = %err, "could not render alert"),
        }
    }
}
