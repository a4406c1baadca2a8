// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly roll-ups. Totals are computed by SQLite on every call; nothing
//! derived is ever stored.

use rusqlite::params;

use crate::db::{Connector, Ledger};
use crate::error::{LedgerError, Result};
use crate::models::{month_key, CategoryTotal, Kind, MonthSummary};

/// SQLite raises "integer overflow" when a `SUM` leaves the i64 range.
fn overflow_as_validation(err: LedgerError) -> LedgerError {
    match err {
        LedgerError::Persistence(rusqlite::Error::SqliteFailure(_, Some(ref msg)))
            if msg.contains("integer overflow") =>
        {
            LedgerError::Validation(format!("Monthly total does not fit in an amount ({})", msg))
        }
        other => other,
    }
}

impl<C: Connector> Ledger<C> {
    /// Sum of `amount` for the month and kind. `0` when nothing matches.
    pub fn total_by_kind(&mut self, year: i32, month: u32, kind: Kind) -> Result<i64> {
        let key = month_key(year, month)?;
        self.with_retry("total_by_kind", |conn| {
            let total: i64 = conn.query_row(
                "SELECT IFNULL(SUM(amount),0) FROM transactions
                 WHERE substr(date,1,7)=?1 AND kind=?2",
                params![key, kind],
                |r| r.get(0),
            )?;
            Ok(total)
        })
        .map_err(overflow_as_validation)
    }

    /// Income minus expense for the month. May be negative.
    pub fn net_balance(&mut self, year: i32, month: u32) -> Result<i64> {
        Ok(self.month_summary(year, month)?.balance)
    }

    pub fn month_summary(&mut self, year: i32, month: u32) -> Result<MonthSummary> {
        let key = month_key(year, month)?;
        let (income, expense) = self.with_retry("month_summary", |conn| {
            Ok(conn.query_row(
                "SELECT
                    IFNULL(SUM(CASE WHEN kind='income' THEN amount END),0),
                    IFNULL(SUM(CASE WHEN kind='expense' THEN amount END),0)
                 FROM transactions WHERE substr(date,1,7)=?1",
                params![key],
                |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)),
            )?)
        })
        .map_err(overflow_as_validation)?;
        Ok(MonthSummary {
            income,
            expense,
            balance: income - expense,
        })
    }

    /// Expense totals per category, largest first. Equal totals are ordered
    /// by category name.
    pub fn expenses_by_category(&mut self, year: i32, month: u32) -> Result<Vec<CategoryTotal>> {
        let key = month_key(year, month)?;
        self.with_retry("expenses_by_category", |conn| {
            let mut stmt = conn.prepare(
                "SELECT category, SUM(amount) AS total
                 FROM transactions
                 WHERE substr(date,1,7)=?1 AND kind='expense'
                 GROUP BY category
                 ORDER BY total DESC, category ASC",
            )?;
            let rows = stmt.query_map(params![key], |r| {
                Ok(CategoryTotal {
                    category: r.get(0)?,
                    total: r.get(1)?,
                })
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            Ok(data)
        })
        .map_err(overflow_as_validation)
    }
}
