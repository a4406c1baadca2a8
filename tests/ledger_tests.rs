// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kakeibo::{classify, Kind, Ledger, MemoryConnector, NewTransaction, Status};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn setup() -> Ledger<MemoryConnector> {
    Ledger::open_in_memory().unwrap()
}

#[test]
fn june_scenario() {
    let mut ledger = setup();
    let food = ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap();
    ledger
        .create(&NewTransaction::income(d(2024, 6, 15), 2000, "salary", "bank"))
        .unwrap();

    assert_eq!(ledger.total_by_kind(2024, 6, Kind::Expense).unwrap(), 5000);
    assert_eq!(ledger.total_by_kind(2024, 6, Kind::Income).unwrap(), 2000);
    assert_eq!(ledger.net_balance(2024, 6).unwrap(), -3000);

    let tx = ledger.get(food).unwrap();
    assert_eq!(classify(&tx, d(2024, 6, 20)), Status::Overdue);
    assert_eq!(classify(&tx, d(2024, 5, 1)), Status::Due);

    ledger.mark_paid(food).unwrap();
    let tx = ledger.get(food).unwrap();
    for today in [d(2024, 5, 1), d(2024, 6, 1), d(2024, 6, 20), d(2030, 1, 1)] {
        assert_eq!(classify(&tx, today), Status::Paid);
    }
}

#[test]
fn totals_match_stored_rows_for_every_month() {
    let mut ledger = setup();
    let rows = [
        (d(2024, 1, 5), 1200, Kind::Expense),
        (d(2024, 1, 9), 800, Kind::Expense),
        (d(2024, 1, 25), 300000, Kind::Income),
        (d(2024, 2, 1), 450, Kind::Expense),
        (d(2024, 2, 29), 90, Kind::Income),
        (d(2025, 1, 5), 7, Kind::Expense),
    ];
    for (date, amount, kind) in rows {
        let new = match kind {
            Kind::Income => NewTransaction::income(date, amount, "salary", "bank"),
            Kind::Expense => NewTransaction::expense(date, amount, "misc", "card"),
        };
        ledger.create(&new).unwrap();
    }

    for (year, month) in [(2024, 1), (2024, 2), (2024, 3), (2025, 1)] {
        let sum = |kind: Kind| -> i64 {
            rows.iter()
                .filter(|(date, _, k)| {
                    *k == kind
                        && date.format("%Y-%m").to_string() == format!("{:04}-{:02}", year, month)
                })
                .map(|(_, amount, _)| *amount)
                .sum()
        };
        let income = ledger.total_by_kind(year, month, Kind::Income).unwrap();
        let expense = ledger.total_by_kind(year, month, Kind::Expense).unwrap();
        assert_eq!(income, sum(Kind::Income));
        assert_eq!(expense, sum(Kind::Expense));
        assert_eq!(ledger.net_balance(year, month).unwrap(), income - expense);

        let summary = ledger.month_summary(year, month).unwrap();
        assert_eq!(summary.income, income);
        assert_eq!(summary.expense, expense);
        assert_eq!(summary.balance, income - expense);
    }
}

#[test]
fn category_breakdown_sums_to_expense_total() {
    let mut ledger = setup();
    ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap();
    ledger
        .create(&NewTransaction::expense(d(2024, 6, 2), 1500, "food", "card"))
        .unwrap();
    ledger
        .create(&NewTransaction::expense(d(2024, 6, 3), 80000, "rent", "bank"))
        .unwrap();
    ledger
        .create(&NewTransaction::income(d(2024, 6, 25), 250000, "salary", "bank"))
        .unwrap();

    let got = ledger.expenses_by_category(2024, 6).unwrap();
    let pairs: Vec<(&str, i64)> = got.iter().map(|c| (c.category.as_str(), c.total)).collect();
    assert_eq!(pairs, vec![("rent", 80000), ("food", 6500)]);

    let sum: i64 = got.iter().map(|c| c.total).sum();
    assert_eq!(sum, ledger.total_by_kind(2024, 6, Kind::Expense).unwrap());
}

#[test]
fn removed_category_still_aggregates() {
    // Categories are free text; a label that was never registered still counts.
    let mut ledger = setup();
    ledger.add_category("food").unwrap();
    ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 100, "old-label", "cash"))
        .unwrap();
    let got = ledger.expenses_by_category(2024, 6).unwrap();
    assert_eq!(got[0].category, "old-label");
}

#[test]
fn rejected_writes_change_nothing() {
    let mut ledger = setup();
    let id = ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap();

    for amount in [0, -1, i64::MIN] {
        assert!(ledger
            .create(&NewTransaction::expense(d(2024, 6, 2), amount, "food", "cash"))
            .unwrap_err()
            .is_validation());
        assert!(ledger
            .update(id, &NewTransaction::expense(d(2024, 6, 2), amount, "food", "cash"))
            .unwrap_err()
            .is_validation());
    }
    assert!(ledger
        .create(&NewTransaction::income(d(2024, 6, 2), 10, "salary", "bank").with_paid(true))
        .unwrap_err()
        .is_validation());

    assert_eq!(ledger.page(1, 10).unwrap().total_count, 1);
    let tx = ledger.get(id).unwrap();
    assert_eq!(tx.amount, 5000);
    assert_eq!(tx.date, d(2024, 6, 1));
}

#[test]
fn five_digit_years_are_rejected() {
    let mut ledger = setup();
    let id = ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap();
    let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();

    assert!(ledger
        .create(&NewTransaction::expense(far, 100, "food", "cash"))
        .unwrap_err()
        .is_validation());
    assert!(ledger
        .update(id, &NewTransaction::expense(far, 100, "food", "cash"))
        .unwrap_err()
        .is_validation());

    let page = ledger.page(1, 10).unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].date, d(2024, 6, 1));
}

#[test]
fn future_dated_bills_are_due() {
    let mut ledger = setup();
    let id = ledger
        .create(&NewTransaction::expense(d(2030, 12, 31), 9999, "insurance", "bank"))
        .unwrap();
    let tx = ledger.get(id).unwrap();
    assert_eq!(classify(&tx, d(2024, 6, 20)), Status::Due);
}

#[test]
fn calendar_marks_overdue_days() {
    let mut ledger = setup();
    ledger
        .create(&NewTransaction::expense(d(2024, 6, 1), 5000, "food", "cash"))
        .unwrap();
    ledger
        .create(&NewTransaction::income(d(2024, 6, 15), 2000, "salary", "bank"))
        .unwrap();
    ledger
        .create(&NewTransaction::expense(d(2024, 6, 28), 700, "phone", "card"))
        .unwrap();

    let days = ledger.month_calendar(2024, 6, d(2024, 6, 20)).unwrap();
    let statuses: Vec<(u32, Status)> = days
        .iter()
        .map(|day| (chrono::Datelike::day(&day.date), day.status))
        .collect();
    assert_eq!(
        statuses,
        vec![(1, Status::Overdue), (15, Status::Income), (28, Status::Due)]
    );
}
