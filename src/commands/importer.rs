// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::Transaction;
use crate::store::{Ledger, parse_records};
use crate::utils::{required, warn_unsaved};
use anyhow::{Context, Result};

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(kv, sub),
        _ => Ok(()),
    }
}

/// Parse an export file. Unlike loading the store, a bad file is an error.
pub fn parse_transactions(raw: &str) -> Result<Vec<Transaction>> {
    parse_records(raw).context("Expected a JSON array of valid transactions")
}

fn import_transactions(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?.trim();
    let mode = required(sub, "mode")?;
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let items = parse_transactions(&raw).with_context(|| format!("Parse {}", path))?;

    let mut ledger = Ledger::load(kv);
    let count = items.len();
    if mode == "replace" {
        ledger.replace_all(items);
        println!("Replaced transactions with {} from {}", count, path);
    } else {
        let added = ledger.merge(items);
        println!(
            "Imported {} of {} transactions from {} ({} already present)",
            added,
            count,
            path,
            count - added
        );
    }
    warn_unsaved("import", ledger.persist_error());
    Ok(())
}
