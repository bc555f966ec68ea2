// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::metrics::recent_transactions;
use crate::models::{Category, NewTransaction, Transaction, TransactionType};
use crate::store::Ledger;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, reference_date, required, warn_unsaved,
};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(kv, sub)?,
        Some(("list", sub)) => list(kv, sub)?,
        Some(("recent", sub)) => list(kv, sub)?,
        Some(("rm", sub)) => remove(kv, sub)?,
        _ => {}
    }
    Ok(())
}

/// Build the new transaction from `tx add` arguments.
pub fn new_transaction(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let description = required(sub, "description")?.trim().to_string();
    let amount = parse_amount(required(sub, "amount")?)?;
    let r#type: TransactionType = required(sub, "type")?.parse()?;
    let category = match (r#type, sub.get_one::<String>("category")) {
        (TransactionType::Income, _) => Category::Income,
        (TransactionType::Expense, Some(c)) => c.parse::<Category>()?,
        (TransactionType::Expense, None) => {
            return Err(anyhow!("--category is required for expenses"));
        }
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => reference_date(sub)?,
    };
    Ok(NewTransaction {
        description,
        amount,
        r#type,
        category,
        date,
    })
}

fn add(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction(sub)?;
    let mut ledger = Ledger::load(kv);
    let tx = ledger.add(new)?;
    println!(
        "Recorded {} {} on {} '{}' ({}) id={}",
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date,
        tx.description,
        tx.category,
        tx.id
    );
    warn_unsaved("transaction", ledger.persist_error());
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        let sign = if t.is_income() { "+" } else { "-" };
        TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            description: t.description.clone(),
            category: format!("{} {}", t.category.meta().icon, t.category.meta().name),
            amount: format!("{}{}", sign, fmt_money(&t.amount)),
        }
    }
}

/// Rows for `tx list` / `tx recent`: latest date first, optionally limited.
pub fn query_rows(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let ledger = Ledger::load(kv);
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(ledger.len());
    recent_transactions(ledger.items(), limit)
        .into_iter()
        .map(TransactionRow::from)
        .collect()
}

fn list(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(kv, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| vec![r.date, r.description, r.category, r.amount, r.id])
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount", "Id"], rows)
        );
    }
    Ok(())
}

fn remove(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let mut ledger = Ledger::load(kv);
    if ledger.delete(id) {
        println!("Removed transaction {}", id);
        warn_unsaved("removal", ledger.persist_error());
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}
