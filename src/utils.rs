// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::check_amount;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::io::BufRead;

/// Value of an argument clap guarantees to be present.
pub fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("Missing argument '{}'", name))
}

/// `--as-of` when given, else today's local date.
pub fn reference_date(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.get_one::<String>("as-of") {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parse a user-entered amount: numeric, not negative, within the limit.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    check_amount(d).with_context(|| format!("Invalid amount '{}'", s.trim()))?;
    Ok(d)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Every date of the given month, in order.
pub fn month_days(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=31).filter_map(move |d| NaiveDate::from_ymd_opt(year, month, d))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_days(year, month).count() as u32
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Message for a change that was applied but could not be written.
pub fn unsaved_warning(what: &str, persist_error: Option<&str>) -> Option<String> {
    persist_error.map(|e| format!("warning: {} kept in memory but not saved: {}", what, e))
}

/// Print [`unsaved_warning`] to stderr when the last write failed.
pub fn warn_unsaved(what: &str, persist_error: Option<&str>) {
    if let Some(msg) = unsaved_warning(what, persist_error) {
        eprintln!("{}", msg);
    }
}

/// Read one line from `input` and accept only an explicit "yes" or "y".
pub fn confirm<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line).context("Read confirmation")?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "yes" || answer == "y")
}
