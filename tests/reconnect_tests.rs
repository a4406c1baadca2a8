// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;
use kakeibo::{Connector, Kind, Ledger, NewTransaction};
use rusqlite::Connection;

struct CountingConnector {
    path: PathBuf,
    opens: Rc<Cell<usize>>,
}

impl Connector for CountingConnector {
    fn connect(&self) -> rusqlite::Result<Connection> {
        self.opens.set(self.opens.get() + 1);
        Connection::open(&self.path)
    }
}

/// Opens without waiting on locks. While `release_on_reconnect` is set, every
/// open after the first drops the competing lock first.
struct LockedOutConnector {
    path: PathBuf,
    opens: Rc<Cell<usize>>,
    lock: Rc<RefCell<Option<Connection>>>,
    release_on_reconnect: bool,
}

impl Connector for LockedOutConnector {
    fn connect(&self) -> rusqlite::Result<Connection> {
        self.opens.set(self.opens.get() + 1);
        if self.release_on_reconnect && self.opens.get() > 1 {
            self.lock.borrow_mut().take();
        }
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::ZERO)?;
        Ok(conn)
    }
}

fn exclusive_lock(path: &Path) -> Connection {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch("BEGIN EXCLUSIVE").unwrap();
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn data_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kakeibo.sqlite");
    let id = {
        let mut ledger = Ledger::open_path(&path).unwrap();
        ledger
            .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
            .unwrap()
    };
    let mut ledger = Ledger::open_path(&path).unwrap();
    assert_eq!(ledger.get(id).unwrap().amount, 5000);
    assert_eq!(ledger.total_by_kind(2024, 6, Kind::Expense).unwrap(), 5000);
}

#[test]
fn connector_is_only_called_once_while_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let opens = Rc::new(Cell::new(0));
    let mut ledger = Ledger::open(CountingConnector {
        path: dir.path().join("kakeibo.sqlite"),
        opens: opens.clone(),
    })
    .unwrap();

    for day in 1..=5 {
        ledger
            .create(&NewTransaction::expense(d(2024, 6, day), 100, "food", "cash"))
            .unwrap();
    }
    assert_eq!(ledger.by_month(2024, 6).unwrap().len(), 5);
    assert_eq!(opens.get(), 1);
}

#[test]
fn initial_open_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file.
    let err = Ledger::open_path(dir.path()).err().unwrap();
    assert!(err.is_persistence());
}

#[test]
fn create_succeeds_after_reconnecting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kakeibo.sqlite");
    let opens = Rc::new(Cell::new(0));
    let lock = Rc::new(RefCell::new(None));
    let mut ledger = Ledger::open(LockedOutConnector {
        path: path.clone(),
        opens: opens.clone(),
        lock: lock.clone(),
        release_on_reconnect: true,
    })
    .unwrap();

    *lock.borrow_mut() = Some(exclusive_lock(&path));
    let id = ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap();

    assert_eq!(opens.get(), 2);
    assert!(lock.borrow().is_none());
    assert_eq!(ledger.get(id).unwrap().amount, 5000);
    assert_eq!(ledger.by_month(2024, 6).unwrap().len(), 1);
}

#[test]
fn create_fails_when_reconnecting_does_not_help() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kakeibo.sqlite");
    let opens = Rc::new(Cell::new(0));
    let lock = Rc::new(RefCell::new(None));
    let mut ledger = Ledger::open(LockedOutConnector {
        path: path.clone(),
        opens: opens.clone(),
        lock: lock.clone(),
        release_on_reconnect: false,
    })
    .unwrap();

    *lock.borrow_mut() = Some(exclusive_lock(&path));
    let err = ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(opens.get(), 2);

    lock.borrow_mut().take();
    assert_eq!(ledger.page(1, 10).unwrap().total_count, 0);
}
