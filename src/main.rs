// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use kakeibo::commands::labels::LabelKind;
use kakeibo::{cli, commands, config::Config, logging, Ledger};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::setup_logging(matches.get_flag("verbose"));

    let config = Config::resolve(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let mut ledger = Ledger::open_path(&config.db_path)
        .with_context(|| format!("Open DB at {}", config.db_path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut ledger, sub)?,
        Some(("category", sub)) => {
            commands::labels::handle(&mut ledger, LabelKind::Category, sub)?
        }
        Some(("method", sub)) => {
            commands::labels::handle(&mut ledger, LabelKind::PaymentMethod, sub)?
        }
        Some(("password", sub)) => commands::password::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
