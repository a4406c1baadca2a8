// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value settings: the shared password and the user-managed category
//! and payment-method lists.

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::db::{Connector, Ledger};
use crate::error::{LedgerError, Result};

pub const PASSWORD_KEY: &str = "password";
pub const CATEGORIES_KEY: &str = "categories";
pub const PAYMENT_METHODS_KEY: &str = "payment_methods";

const SEPARATOR: char = ',';

/// Ordered list of unique labels, stored comma-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Parse the stored form. Blank entries and repeats are skipped so that
    /// hand-edited rows still yield a valid set.
    pub fn parse(stored: &str) -> Self {
        let mut set = Self::default();
        for label in stored.split(SEPARATOR).map(str::trim) {
            if !label.is_empty() && !set.contains(label) {
                set.labels.push(label.to_string());
            }
        }
        set
    }

    pub fn to_stored(&self) -> String {
        self.labels.join(",")
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn list(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append `label` at the end. `entity` names the set in error messages.
    pub fn add(&mut self, entity: &'static str, label: &str) -> Result<()> {
        let label = label.trim();
        if label.is_empty() {
            return Err(LedgerError::Validation(format!(
                "{} name must not be empty",
                entity
            )));
        }
        if label.contains(SEPARATOR) {
            return Err(LedgerError::Validation(format!(
                "{} name must not contain '{}'",
                entity, SEPARATOR
            )));
        }
        if self.contains(label) {
            return Err(LedgerError::Duplicate {
                entity,
                label: label.to_string(),
            });
        }
        self.labels.push(label.to_string());
        Ok(())
    }
}

fn get_setting(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key=?1",
        params![key],
        |r| r.get(0),
    )
    .optional()
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

impl<C: Connector> Ledger<C> {
    fn label_set(&mut self, key: &'static str) -> Result<LabelSet> {
        self.with_retry("label_set", |conn| {
            let stored = get_setting(conn, key)?.unwrap_or_default();
            Ok(LabelSet::parse(&stored))
        })
    }

    fn add_label(&mut self, key: &'static str, entity: &'static str, label: &str) -> Result<()> {
        let result = self.with_retry("add_label", |conn| {
            let sql = conn.transaction()?;
            let mut set = LabelSet::parse(&get_setting(&sql, key)?.unwrap_or_default());
            set.add(entity, label)?;
            set_setting(&sql, key, &set.to_stored())?;
            sql.commit()?;
            Ok(())
        });
        match &result {
            Ok(()) => tracing::info!("added {} '{}'", entity.to_lowercase(), label.trim()),
            Err(e @ LedgerError::Duplicate { .. }) => tracing::warn!("{e}"),
            Err(_) => {}
        }
        result
    }

    pub fn categories(&mut self) -> Result<LabelSet> {
        self.label_set(CATEGORIES_KEY)
    }

    pub fn add_category(&mut self, label: &str) -> Result<()> {
        self.add_label(CATEGORIES_KEY, "Category", label)
    }

    pub fn payment_methods(&mut self) -> Result<LabelSet> {
        self.label_set(PAYMENT_METHODS_KEY)
    }

    pub fn add_payment_method(&mut self, label: &str) -> Result<()> {
        self.add_label(PAYMENT_METHODS_KEY, "Payment method", label)
    }

    /// Store a bcrypt hash of `raw` as the shared access password.
    pub fn set_password(&mut self, raw: &str, cost: u32) -> Result<()> {
        if raw.is_empty() {
            return Err(LedgerError::Validation("Password must not be empty".into()));
        }
        let hashed = bcrypt::hash(raw, cost)?;
        self.with_retry("set_password", |conn| {
            set_setting(conn, PASSWORD_KEY, &hashed)?;
            Ok(())
        })?;
        tracing::info!("password updated");
        Ok(())
    }

    /// Check `raw` against the stored password. `false` when none is set or
    /// when the stored value is not a bcrypt hash.
    pub fn verify_password(&mut self, raw: &str) -> Result<bool> {
        let stored = self.with_retry("verify_password", |conn| {
            Ok(get_setting(conn, PASSWORD_KEY)?)
        })?;
        match stored {
            Some(hash) => match bcrypt::verify(raw, &hash) {
                Ok(matches) => Ok(matches),
                Err(
                    e @ (bcrypt::BcryptError::InvalidHash(_)
                    | bcrypt::BcryptError::InvalidPrefix(_)
                    | bcrypt::BcryptError::InvalidCost(_)),
                ) => {
                    tracing::warn!("stored password is not a bcrypt hash ({e}), reset it");
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            },
            None => {
                tracing::warn!("no password has been set");
                Ok(false)
            }
        }
    }
}
