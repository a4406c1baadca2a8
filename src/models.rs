// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown kind '{}', expected 'income' or 'expense'",
                other
            ))),
        }
    }
}

impl ToSql for Kind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Kind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse::<Kind>().map_err(|_| FromSqlError::InvalidType)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: i64,
    pub kind: Kind,
    pub category: String,
    pub description: Option<String>,
    pub payment_method: String,
    pub paid: bool,
}

/// Every mutable field of a transaction. Used for both create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: i64,
    pub kind: Kind,
    pub category: String,
    pub description: Option<String>,
    pub payment_method: String,
    pub paid: bool,
}

impl NewTransaction {
    pub fn expense(date: NaiveDate, amount: i64, category: &str, payment_method: &str) -> Self {
        Self {
            date,
            amount,
            kind: Kind::Expense,
            category: category.to_string(),
            description: None,
            payment_method: payment_method.to_string(),
            paid: false,
        }
    }

    pub fn income(date: NaiveDate, amount: i64, category: &str, payment_method: &str) -> Self {
        Self {
            kind: Kind::Income,
            ..Self::expense(date, amount, category, payment_method)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Check the preconditions and return a trimmed copy ready to be written.
    pub fn validated(&self) -> Result<NewTransaction> {
        if self.amount <= 0 {
            return Err(LedgerError::Validation(format!(
                "Amount must be greater than zero, got {}",
                self.amount
            )));
        }
        check_year(self.date.year())?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("Category must not be empty".into()));
        }
        let payment_method = self.payment_method.trim();
        if payment_method.is_empty() {
            return Err(LedgerError::Validation(
                "Payment method must not be empty".into(),
            ));
        }
        if self.kind == Kind::Income && self.paid {
            return Err(LedgerError::Validation(
                "Income transactions cannot be marked as paid".into(),
            ));
        }
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewTransaction {
            date: self.date,
            amount: self.amount,
            kind: self.kind,
            category: category.to_string(),
            description,
            payment_method: payment_method.to_string(),
            paid: self.paid,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

/// Stored dates are `YYYY-MM-DD` text; only four-digit years sort and
/// filter correctly.
fn check_year(year: i32) -> Result<()> {
    if !(0..=9999).contains(&year) {
        return Err(LedgerError::Validation(format!("Invalid year {}", year)));
    }
    Ok(())
}

/// The `YYYY-MM` prefix used to match stored dates of a month.
pub(crate) fn month_key(year: i32, month: u32) -> Result<String> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::Validation(format!(
            "Invalid month number {}",
            month
        )));
    }
    check_year(year)?;
    Ok(format!("{:04}-{:02}", year, month))
}
