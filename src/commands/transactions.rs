// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{Connector, Ledger};
use crate::models::{Kind, NewTransaction, Transaction};
use crate::pagination::PAGE_SIZE;
use crate::status::classify;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};

pub fn handle<C: Connector>(ledger: &mut Ledger<C>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            ledger.delete(id)?;
            println!("Removed transaction #{}", id);
        }
        Some(("pay", sub)) => {
            let id = *sub.get_one::<i64>("id").context("--id is required")?;
            ledger.mark_paid(id)?;
            println!("Marked transaction #{} as paid", id);
        }
        Some(("show", sub)) => show(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

/// Build the candidate transaction from `tx add` / `tx edit` arguments.
pub fn read_fields(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let date = parse_date(sub.get_one::<String>("date").context("--date is required")?)?;
    let amount = parse_amount(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let kind: Kind = sub
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("expense")
        .parse()?;
    let category = sub
        .get_one::<String>("category")
        .context("--category is required")?;
    let method = sub
        .get_one::<String>("method")
        .context("--method is required")?;
    Ok(NewTransaction {
        date,
        amount,
        kind,
        category: category.to_string(),
        description: sub.get_one::<String>("description").cloned(),
        payment_method: method.to_string(),
        paid: sub.get_flag("paid"),
    })
}

fn add<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let new = read_fields(sub)?;
    warn_unknown_labels(ledger, &new)?;
    let id = ledger.create(&new)?;
    println!(
        "Recorded {} {} on {} ({}) as #{}",
        new.kind,
        fmt_amount(new.amount),
        new.date,
        new.category.trim(),
        id
    );
    Ok(())
}

fn edit<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let new = read_fields(sub)?;
    warn_unknown_labels(ledger, &new)?;
    ledger.update(id, &new)?;
    println!("Updated transaction #{}", id);
    Ok(())
}

// Labels are free text; an unknown one is accepted but worth pointing out.
fn warn_unknown_labels<C: Connector>(ledger: &mut Ledger<C>, new: &NewTransaction) -> Result<()> {
    let categories = ledger.categories()?;
    if !categories.is_empty() && !categories.contains(new.category.trim()) {
        eprintln!("note: '{}' is not a known category", new.category.trim());
    }
    let methods = ledger.payment_methods()?;
    if !methods.is_empty() && !methods.contains(new.payment_method.trim()) {
        eprintln!(
            "note: '{}' is not a known payment method",
            new.payment_method.trim()
        );
    }
    Ok(())
}

fn show<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let tx = ledger.get(id)?;
    let today = chrono::Local::now().date_naive();
    let row = TransactionRow::new(&tx, today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        println!("{}", pretty_table(&HEADERS, vec![row.cells()]));
    }
    Ok(())
}

fn list<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<()> {
    let listing = query_rows(ledger, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &listing.rows)? {
        if listing.rows.is_empty() {
            println!("No transactions found.");
        } else {
            let rows = listing.rows.iter().map(TransactionRow::cells).collect();
            println!("{}", pretty_table(&HEADERS, rows));
        }
        if let Some(footer) = listing.footer {
            println!("{}", footer);
        }
    }
    Ok(())
}

const HEADERS: [&str; 8] = [
    "ID", "Date", "Amount", "Kind", "Category", "Description", "Payment", "Status",
];

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub amount: i64,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub payment_method: String,
    pub status: String,
    pub color: String,
}

impl TransactionRow {
    pub fn new(tx: &Transaction, today: NaiveDate) -> Self {
        let status = classify(tx, today);
        Self {
            id: tx.id,
            date: tx.date.to_string(),
            amount: tx.amount,
            kind: tx.kind.to_string(),
            category: tx.category.clone(),
            description: tx.description.clone().unwrap_or_default(),
            payment_method: tx.payment_method.clone(),
            status: status.to_string(),
            color: status.color().to_string(),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            fmt_amount(self.amount),
            self.kind.clone(),
            self.category.clone(),
            self.description.clone(),
            self.payment_method.clone(),
            self.status.clone(),
        ]
    }
}

pub struct Listing {
    pub rows: Vec<TransactionRow>,
    pub footer: Option<String>,
}

/// `--month` lists a whole month; otherwise one page (default page 1).
pub fn query_rows<C: Connector>(ledger: &mut Ledger<C>, sub: &clap::ArgMatches) -> Result<Listing> {
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };

    if let Some(month) = sub.get_one::<String>("month") {
        let (year, month) = parse_month(month)?;
        let rows = ledger
            .by_month(year, month)?
            .iter()
            .map(|tx| TransactionRow::new(tx, today))
            .collect();
        return Ok(Listing { rows, footer: None });
    }

    let page_number = sub.get_one::<usize>("page").copied().unwrap_or(1);
    let page = ledger.page(page_number, PAGE_SIZE)?;
    let footer = if page.in_range() {
        format!(
            "Page {} of {} ({} transactions)",
            page.page_number,
            page.last_page(),
            page.total_count
        )
    } else {
        format!(
            "Page {} is out of range (1..={})",
            page.page_number,
            page.last_page()
        )
    };
    let rows = page
        .items
        .iter()
        .map(|tx| TransactionRow::new(tx, today))
        .collect();
    Ok(Listing {
        rows,
        footer: Some(footer),
    })
}
