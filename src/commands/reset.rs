// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::BudgetBook;
use crate::db::KeyValueStore;
use crate::store::{Ledger, TaskBoard};
use crate::utils::confirm;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    let stdin = std::io::stdin();
    run(kv, m, &mut stdin.lock())?;
    Ok(())
}

/// Clear stored data once confirmed by `--yes` or a "yes" read from `input`.
/// Returns whether anything was deleted.
pub fn run<R: BufRead>(kv: &dyn KeyValueStore, m: &clap::ArgMatches, input: &mut R) -> Result<bool> {
    let all = m.get_flag("all");
    if !m.get_flag("yes") {
        let what = if all {
            "ALL transactions, tasks and budgets"
        } else {
            "all transactions"
        };
        print!("Delete {}? This cannot be undone. Type 'yes' to confirm: ", what);
        std::io::stdout().flush()?;
        if !confirm(input)? {
            println!("Aborted, nothing deleted");
            return Ok(false);
        }
    }

    Ledger::load(kv).clear()?;
    if all {
        TaskBoard::load(kv).clear()?;
        BudgetBook::load(kv).reset()?;
    }
    info!(all, "stored data cleared");
    println!("Data cleared");
    Ok(true)
}
