// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::{Connector, Ledger};
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_month, pretty_table};

pub fn handle<C: Connector>(ledger: &mut Ledger<C>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        Some(("calendar", sub)) => calendar(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_of(sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    parse_month(sub.get_one::<String>("month").context("--month is required")?)
}

fn summary<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let s = ledger.month_summary(year, month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let data = vec![vec![
            format!("{:04}-{:02}", year, month),
            fmt_amount(s.income),
            fmt_amount(s.expense),
            fmt_amount(s.balance),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], data)
        );
    }
    Ok(())
}

fn by_category<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let totals = ledger.expenses_by_category(year, month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let data = totals
            .iter()
            .map(|c| vec![c.category.clone(), fmt_amount(c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn calendar<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_of(sub)?;
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let days = ledger.month_calendar(year, month, today)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &days)? {
        let data = days
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    fmt_amount(d.income),
                    fmt_amount(d.expense),
                    d.count.to_string(),
                    format!("{} ({})", d.status, d.status.color()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expense", "Count", "Status"], data)
        );
    }
    Ok(())
}
