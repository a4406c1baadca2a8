// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use crate::db::{Connector, Ledger};

pub fn handle<C: Connector>(ledger: &mut Ledger<C>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", _)) => {
            let new = rpassword::prompt_password("New password: ")?;
            let confirm = rpassword::prompt_password("Confirm new password: ")?;
            if new.is_empty() || new != confirm {
                bail!("Passwords do not match or are empty");
            }
            ledger.set_password(&new, bcrypt::DEFAULT_COST)?;
            println!("Password updated");
        }
        Some(("check", _)) => {
            let attempt = rpassword::prompt_password("Password: ")?;
            if ledger.verify_password(&attempt)? {
                println!("Access granted");
            } else {
                bail!("Incorrect password");
            }
        }
        _ => {}
    }
    Ok(())
}
