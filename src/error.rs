// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy for ledger operations.
//!
//! Every public ledger operation returns either its value or exactly one of
//! these variants. Validation failures never reach the database, and writes
//! that fail are rolled back before the error is returned.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Caller-supplied data violates a precondition. No state was changed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The label is already present in the managed set. No state was changed.
    #[error("{entity} already exists: {label}")]
    Duplicate { entity: &'static str, label: String },

    /// The database could not complete the operation, even after one
    /// reconnect-and-retry.
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Password error: {0}")]
    Password(#[from] bcrypt::BcryptError),
}

impl LedgerError {
    pub fn transaction_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Transaction",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
