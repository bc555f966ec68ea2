// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::Transaction;
use crate::store::Ledger;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(kv, sub),
        _ => Ok(()),
    }
}

/// `household-data-YYYY-MM-DD.json` inside `dir`.
pub fn default_export_path(dir: &Path, today: NaiveDate) -> PathBuf {
    dir.join(format!("household-data-{}.json", today.format("%Y-%m-%d")))
}

/// Full list as pretty-printed JSON, the same shape the store persists.
pub fn transactions_json(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

pub fn write_csv(transactions: &[Transaction], out: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "date",
        "type",
        "category",
        "description",
        "amount",
        "createdAt",
    ])?;
    for t in transactions {
        wtr.write_record([
            t.id.clone(),
            t.date.to_string(),
            t.r#type.to_string(),
            t.category.to_string(),
            t.description.clone(),
            t.amount.to_string(),
            t.created_at.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_transactions(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "json".into());
    let out = match sub.get_one::<String>("out") {
        Some(p) => PathBuf::from(p),
        None => {
            let dir = sub.get_one::<String>("dir").map(String::as_str).unwrap_or(".");
            let path = default_export_path(Path::new(dir), chrono::Local::now().date_naive());
            if fmt == "csv" {
                path.with_extension("csv")
            } else {
                path
            }
        }
    };

    let ledger = Ledger::load(kv);
    match fmt.as_str() {
        "json" => {
            std::fs::write(&out, transactions_json(ledger.items())?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        "csv" => write_csv(ledger.items(), &out)?,
        _ => return Err(anyhow!("Unknown format: {} (use json|csv)", fmt)),
    }
    println!(
        "Exported {} transactions to {}",
        ledger.len(),
        out.display()
    );
    Ok(())
}
