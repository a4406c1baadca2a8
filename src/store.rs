// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction CRUD.
//!
//! Writes run inside an SQLite transaction and check that the target row
//! exists before touching it, so a missing id surfaces as
//! [`LedgerError::NotFound`] and nothing is partially applied.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{Connector, Ledger};
use crate::error::{LedgerError, Result};
use crate::models::{month_key, NewTransaction, Transaction};

pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, date, amount, kind, category, description, payment_method, paid";

pub(crate) fn map_transaction(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        date: r.get(1)?,
        amount: r.get(2)?,
        kind: r.get(3)?,
        category: r.get(4)?,
        description: r.get(5)?,
        payment_method: r.get(6)?,
        paid: r.get(7)?,
    })
}

fn ensure_exists(conn: &Connection, id: i64) -> Result<()> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM transactions WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(LedgerError::transaction_not_found(id)),
    }
}

impl<C: Connector> Ledger<C> {
    /// Record a new transaction and return the id assigned to it.
    pub fn create(&mut self, new: &NewTransaction) -> Result<i64> {
        let tx = new.validated()?;
        let id = self.with_retry("create", |conn| {
            let sql = conn.transaction()?;
            sql.execute(
                "INSERT INTO transactions(date, amount, kind, category, description, payment_method, paid)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    tx.date,
                    tx.amount,
                    tx.kind,
                    tx.category,
                    tx.description,
                    tx.payment_method,
                    tx.paid
                ],
            )?;
            let id = sql.last_insert_rowid();
            sql.commit()?;
            Ok(id)
        })?;
        tracing::info!(
            "recorded {} {} on {} ({}) as #{}",
            tx.kind,
            tx.amount,
            tx.date,
            tx.category,
            id
        );
        Ok(id)
    }

    /// Replace every mutable field of transaction `id`.
    pub fn update(&mut self, id: i64, new: &NewTransaction) -> Result<()> {
        let tx = new.validated()?;
        self.with_retry("update", |conn| {
            let sql = conn.transaction()?;
            ensure_exists(&sql, id)?;
            sql.execute(
                "UPDATE transactions
                 SET date=?1, amount=?2, kind=?3, category=?4, description=?5, payment_method=?6, paid=?7
                 WHERE id=?8",
                params![
                    tx.date,
                    tx.amount,
                    tx.kind,
                    tx.category,
                    tx.description,
                    tx.payment_method,
                    tx.paid,
                    id
                ],
            )?;
            sql.commit()?;
            Ok(())
        })?;
        tracing::info!("updated transaction #{id}");
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.with_retry("delete", |conn| {
            let sql = conn.transaction()?;
            ensure_exists(&sql, id)?;
            sql.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
            sql.commit()?;
            Ok(())
        })?;
        tracing::info!("deleted transaction #{id}");
        Ok(())
    }

    /// Flag transaction `id` as paid. Applies to any kind; classification
    /// ignores the flag for income.
    pub fn mark_paid(&mut self, id: i64) -> Result<()> {
        self.with_retry("mark_paid", |conn| {
            let sql = conn.transaction()?;
            ensure_exists(&sql, id)?;
            sql.execute("UPDATE transactions SET paid=1 WHERE id=?1", params![id])?;
            sql.commit()?;
            Ok(())
        })?;
        tracing::info!("marked transaction #{id} as paid");
        Ok(())
    }

    pub fn get(&mut self, id: i64) -> Result<Transaction> {
        self.with_retry("get", |conn| {
            let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id=?1");
            conn.query_row(&sql, params![id], map_transaction)
                .optional()?
                .ok_or_else(|| LedgerError::transaction_not_found(id))
        })
    }

    /// All transactions dated in the given month, newest first.
    pub fn by_month(&mut self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let key = month_key(year, month)?;
        tracing::debug!("loading transactions for {key}");
        self.with_retry("by_month", |conn| {
            let sql = format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transactions
                 WHERE substr(date,1,7)=?1
                 ORDER BY date DESC, id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![key], map_transaction)?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            Ok(data)
        })
    }
}
