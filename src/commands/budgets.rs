// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{BudgetBook, budget_report};
use crate::db::KeyValueStore;
use crate::models::Category;
use crate::store::Ledger;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, parse_amount, pretty_table, reference_date, required,
    warn_unsaved,
};
use anyhow::Result;

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(kv, sub)?,
        Some(("list", sub)) => list(kv, sub)?,
        Some(("report", sub)) => report(kv, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = required(sub, "category")?.parse()?;
    let amount = parse_amount(required(sub, "amount")?)?;
    let mut book = BudgetBook::load(kv);
    book.set(category, amount)?;
    warn_unsaved("budget", book.persist_error());
    println!("Budget set for {} = {}", category.meta().name, fmt_money(&amount));
    Ok(())
}

fn list(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let book = BudgetBook::load(kv);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), book.limits())? {
        let rows: Vec<Vec<String>> = book
            .limits()
            .iter()
            .filter(|(c, _)| **c != Category::Income)
            .map(|(c, a)| vec![format!("{} {}", c.meta().icon, c.meta().name), fmt_money(a)])
            .collect();
        println!("{}", pretty_table(&["Category", "Budget"], rows));
    }
    Ok(())
}

fn report(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let book = BudgetBook::load(kv);
    let ledger = Ledger::load(kv);
    let data = budget_report(book.limits(), ledger.items(), today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let mut rows: Vec<Vec<String>> = data
            .items
            .iter()
            .map(|i| {
                vec![
                    format!("{} {}", i.icon, i.name),
                    fmt_money(&i.budget),
                    fmt_money(&i.spent),
                    fmt_percent(&i.percentage),
                    i.level.as_str().to_string(),
                ]
            })
            .collect();
        rows.push(vec![
            "Total".into(),
            fmt_money(&data.total_budget),
            fmt_money(&data.total_spent),
            fmt_percent(&data.usage),
            format!("{} left", fmt_money(&data.remaining)),
        ]);
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Used", "Status"], rows)
        );
    }
    Ok(())
}
