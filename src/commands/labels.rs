// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `category` and `method` subcommands.

use anyhow::{Context, Result};

use crate::db::{Connector, Ledger};
use crate::error::LedgerError;
use crate::utils::{maybe_print_json, pretty_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Category,
    PaymentMethod,
}

impl LabelKind {
    fn title(&self) -> &'static str {
        match self {
            LabelKind::Category => "Category",
            LabelKind::PaymentMethod => "Payment method",
        }
    }
}

pub fn handle<C: Connector>(
    ledger: &mut Ledger<C>,
    kind: LabelKind,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("name is required")?;
            let res = match kind {
                LabelKind::Category => ledger.add_category(name),
                LabelKind::PaymentMethod => ledger.add_payment_method(name),
            };
            match res {
                Ok(()) => println!("Added {} '{}'", kind.title().to_lowercase(), name.trim()),
                // Reported, but not a failure of the command.
                Err(e @ LedgerError::Duplicate { .. }) => eprintln!("warning: {}", e),
                Err(e) => return Err(e.into()),
            }
        }
        Some(("list", sub)) => {
            let set = match kind {
                LabelKind::Category => ledger.categories()?,
                LabelKind::PaymentMethod => ledger.payment_methods()?,
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &set.list())? {
                let data = set.list().iter().map(|l| vec![l.clone()]).collect();
                println!("{}", pretty_table(&[kind.title()], data));
            }
        }
        _ => {}
    }
    Ok(())
}
