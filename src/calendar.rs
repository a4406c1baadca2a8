// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{Connector, Ledger};
use crate::error::{LedgerError, Result};
use crate::models::{Kind, Transaction};
use crate::status::{classify, Status};

/// Roll-up of one calendar day that has at least one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub income: i64,
    pub expense: i64,
    pub count: usize,
    /// Most urgent status among the day's transactions.
    pub status: Status,
}

/// Group `transactions` by day, ascending.
pub fn group_by_day(transactions: &[Transaction], today: NaiveDate) -> Result<Vec<CalendarDay>> {
    let mut days: BTreeMap<NaiveDate, CalendarDay> = BTreeMap::new();
    for tx in transactions {
        let status = classify(tx, today);
        let day = days.entry(tx.date).or_insert(CalendarDay {
            date: tx.date,
            income: 0,
            expense: 0,
            count: 0,
            status,
        });
        let total = match tx.kind {
            Kind::Income => &mut day.income,
            Kind::Expense => &mut day.expense,
        };
        *total = total.checked_add(tx.amount).ok_or_else(|| {
            LedgerError::Validation(format!("Daily {} total for {} overflows", tx.kind, tx.date))
        })?;
        day.count += 1;
        if status.urgency() > day.status.urgency() {
            day.status = status;
        }
    }
    Ok(days.into_values().collect())
}

impl<C: Connector> Ledger<C> {
    pub fn month_calendar(
        &mut self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<Vec<CalendarDay>> {
        let transactions = self.by_month(year, month)?;
        group_by_day(&transactions, today)
    }
}
