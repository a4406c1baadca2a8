// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Kind, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Income,
    Paid,
    Overdue,
    Due,
}

impl Status {
    /// Higher is more urgent: Overdue > Due > Paid > Income.
    pub fn urgency(&self) -> u8 {
        match self {
            Status::Income => 0,
            Status::Paid => 1,
            Status::Due => 2,
            Status::Overdue => 3,
        }
    }

    /// Conventional display colour.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Income => "green",
            Status::Paid => "blue",
            Status::Overdue => "red",
            Status::Due => "yellow",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Income => "income",
            Status::Paid => "paid",
            Status::Overdue => "overdue",
            Status::Due => "due",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(tx: &Transaction, today: NaiveDate) -> Status {
    if tx.kind == Kind::Income {
        Status::Income
    } else if tx.paid {
        Status::Paid
    } else if tx.date < today {
        Status::Overdue
    } else {
        Status::Due
    }
}
