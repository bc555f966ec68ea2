// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chart::{self, ChartArea};
use crate::db::KeyValueStore;
use crate::metrics::{daily_spending, insights, monthly_summary, spending_breakdown, total_balance};
use crate::store::Ledger;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table, reference_date, required};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("breakdown", sub)) => breakdown(kv, sub)?,
        Some(("trend", sub)) => trend(kv, sub)?,
        Some(("insights", sub)) => report_insights(kv, sub)?,
        Some(("chart", sub)) => write_chart(kv, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    total_balance: rust_decimal::Decimal,
    #[serde(flatten)]
    month: crate::models::MonthlySummary,
}

pub fn summary(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let ledger = Ledger::load(kv);
    let data = Summary {
        total_balance: total_balance(ledger.items()),
        month: monthly_summary(ledger.items(), today),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let net = data.month.net_income;
        let sign = if net >= rust_decimal::Decimal::ZERO { "+" } else { "" };
        let rows = vec![
            vec!["Total balance".into(), fmt_money(&data.total_balance)],
            vec![format!("Income {}", today.format("%Y-%m")), fmt_money(&data.month.income)],
            vec![format!("Expenses {}", today.format("%Y-%m")), fmt_money(&data.month.expenses)],
            vec!["Net income".into(), format!("{}{}", sign, fmt_money(&net))],
        ];
        println!("{}", pretty_table(&["Figure", "Amount"], rows));
    }
    Ok(())
}

fn breakdown(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let data = spending_breakdown(ledger.items());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    format!("{} {}", c.icon, c.name),
                    fmt_money(&c.amount),
                    fmt_percent(&c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn trend(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let ledger = Ledger::load(kv);
    let data = daily_spending(ledger.items(), today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|d| vec![d.date.to_string(), fmt_money(&d.amount)])
            .collect();
        println!("{}", pretty_table(&["Date", "Spent"], rows));
    }
    Ok(())
}

fn report_insights(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let ledger = Ledger::load(kv);
    let data = insights(ledger.items(), today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let highest = data
            .highest_spending_day
            .as_ref()
            .map(|d| format!("{} ({})", d.date.format("%b %-d"), fmt_money(&d.amount)))
            .unwrap_or_else(|| "-".into());
        let rows = vec![
            vec!["Monthly total".into(), fmt_money(&data.monthly_total)],
            vec!["Average daily spending".into(), fmt_money(&data.average_daily_spending)],
            vec!["Highest spending day".into(), highest],
            vec!["Savings rate".into(), fmt_percent(&data.savings_rate)],
            vec!["Expense ratio".into(), format!("{:.2}", data.expense_ratio.round_dp(2))],
            vec!["Weekly change".into(), fmt_percent(&data.weekly_change)],
            vec![
                "Transactions".into(),
                format!(
                    "{} ({} income, {} expense)",
                    data.transaction_count, data.income_count, data.expense_count
                ),
            ],
        ];
        println!("{}", pretty_table(&["Insight", "Value"], rows));
    }
    Ok(())
}

fn write_chart(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let today = reference_date(sub)?;
    let out = required(sub, "out")?;
    let mut area = ChartArea::default();
    if let Some(w) = sub.get_one::<f64>("width") {
        area.width = *w;
    }
    if let Some(h) = sub.get_one::<f64>("height") {
        area.height = *h;
    }
    let ledger = Ledger::load(kv);
    let data = daily_spending(ledger.items(), today);
    let svg = chart::render_svg(&chart::build(&data, &area));
    std::fs::write(out, svg).with_context(|| format!("Write chart to {}", out))?;
    println!("Wrote spending chart for {} to {}", today.format("%Y-%m"), out);
    Ok(())
}
