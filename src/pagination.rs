// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::params;
use serde::Serialize;

use crate::db::{Connector, Ledger};
use crate::error::{LedgerError, Result};
use crate::models::Transaction;
use crate::store::{map_transaction, TRANSACTION_COLUMNS};

pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` rows. Zero rows means zero pages.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// One window of the full transaction list, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub items: Vec<Transaction>,
    pub total_count: usize,
    pub page_number: usize,
    pub page_size: usize,
}

impl Page {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    /// Highest valid page number. An empty ledger still has page 1.
    pub fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn in_range(&self) -> bool {
        (1..=self.last_page()).contains(&self.page_number)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1 && self.page_number <= self.last_page()
    }

    pub fn has_next(&self) -> bool {
        self.page_number >= 1 && self.page_number < self.last_page()
    }
}

impl<C: Connector> Ledger<C> {
    /// Fetch page `page_number` (1-indexed). Pages outside
    /// `1..=max(1, total_pages)` come back empty rather than as an error.
    pub fn page(&mut self, page_number: usize, page_size: usize) -> Result<Page> {
        if page_size == 0 {
            return Err(LedgerError::Validation(
                "Page size must be greater than zero".into(),
            ));
        }
        let (items, total_count) = self.with_retry("page", |conn| {
            let snapshot = conn.transaction()?;
            let total: i64 =
                snapshot.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
            let mut items = Vec::new();
            if page_number >= 1 {
                let offset = (page_number - 1).saturating_mul(page_size);
                let sql = format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM transactions
                     ORDER BY date DESC, id DESC
                     LIMIT ?1 OFFSET ?2"
                );
                let mut stmt = snapshot.prepare(&sql)?;
                let rows = stmt.query_map(
                    params![page_size as i64, i64::try_from(offset).unwrap_or(i64::MAX)],
                    map_transaction,
                )?;
                for row in rows {
                    items.push(row?);
                }
            }
            snapshot.commit()?;
            Ok((items, total as usize))
        })?;
        tracing::debug!(
            "page {page_number} of {} ({} rows)",
            total_pages(total_count, page_size),
            items.len()
        );
        Ok(Page {
            items,
            total_count,
            page_number,
            page_size,
        })
    }
}
