// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod settings;
pub mod status;
pub mod store;
pub mod utils;

pub use db::{Connector, FileConnector, Ledger, MemoryConnector};
pub use error::{LedgerError, Result};
pub use models::{CategoryTotal, Kind, MonthSummary, NewTransaction, Transaction};
pub use pagination::{Page, PAGE_SIZE};
pub use status::{classify, Status};
