// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Figures derived from the transaction list. Every function recomputes from
//! scratch and takes the reference date explicitly.

use crate::models::{Category, CategoryData, DailySpending, MonthlySummary, Transaction};
use crate::utils::month_days;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_RECENT_LIMIT: usize = 5;

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn in_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Income minus expenses over the whole list. May be negative.
pub fn total_balance(transactions: &[Transaction]) -> Decimal {
    transactions.iter().fold(Decimal::ZERO, |acc, t| {
        if t.is_income() {
            acc.saturating_add(t.amount)
        } else {
            acc.saturating_sub(t.amount)
        }
    })
}

/// Income, expenses and net for the calendar month containing `today`.
pub fn monthly_summary(transactions: &[Transaction], today: NaiveDate) -> MonthlySummary {
    let mut s = MonthlySummary::default();
    for t in transactions.iter().filter(|t| in_month(t.date, today)) {
        if t.is_income() {
            s.income = s.income.saturating_add(t.amount);
        } else {
            s.expenses = s.expenses.saturating_add(t.amount);
        }
    }
    s.net_income = s.income.saturating_sub(s.expenses);
    s
}

/// Expense totals per category with their share of all expenses, largest
/// first. Equal amounts keep the order in which categories first appear.
pub fn spending_breakdown(transactions: &[Transaction]) -> Vec<CategoryData> {
    let mut groups: Vec<(Category, Decimal)> = Vec::new();
    let mut total = Decimal::ZERO;
    for t in transactions.iter().filter(|t| t.is_expense()) {
        total = total.saturating_add(t.amount);
        match groups.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum = sum.saturating_add(t.amount),
            None => groups.push((t.category, t.amount)),
        }
    }

    let mut out: Vec<CategoryData> = groups
        .into_iter()
        .map(|(category, amount)| {
            let meta = category.meta();
            let percentage = percent_of(amount, total);
            CategoryData {
                category,
                name: meta.name.to_string(),
                icon: meta.icon.to_string(),
                percentage,
                amount,
                color: meta.color.to_string(),
            }
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    out
}

/// One zero-seeded bucket per day of the month containing `today`, filled
/// with that day's expenses, in date order.
pub fn daily_spending(transactions: &[Transaction], today: NaiveDate) -> Vec<DailySpending> {
    let mut buckets: BTreeMap<NaiveDate, Decimal> = month_days(today.year(), today.month())
        .map(|d| (d, Decimal::ZERO))
        .collect();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(sum) = buckets.get_mut(&t.date) {
            *sum = sum.saturating_add(t.amount);
        }
    }
    buckets
        .into_iter()
        .map(|(date, amount)| DailySpending { date, amount })
        .collect()
}

/// Up to `limit` transactions, latest date first. Same-day transactions keep
/// their list order, which puts the most recently added first.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut out: Vec<&Transaction> = transactions.iter().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(limit);
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub monthly_total: Decimal,
    pub average_daily_spending: Decimal,
    pub highest_spending_day: Option<DailySpending>,
    pub savings_rate: Decimal,
    pub expense_ratio: Decimal,
    pub weekly_change: Decimal,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
}

/// Report-page figures for the month containing `today`.
pub fn insights(transactions: &[Transaction], today: NaiveDate) -> Insights {
    let trend = daily_spending(transactions, today);
    let summary = monthly_summary(transactions, today);

    let monthly_total = saturating_sum(trend.iter().map(|d| d.amount));
    let spending_days = trend.iter().filter(|d| d.amount > Decimal::ZERO).count();
    let average_daily_spending = if spending_days > 0 {
        monthly_total / Decimal::from(spending_days)
    } else {
        Decimal::ZERO
    };

    // first maximum wins
    let highest_spending_day = trend
        .iter()
        .fold(None::<&DailySpending>, |best, d| match best {
            Some(b) if d.amount <= b.amount => Some(b),
            _ => Some(d),
        })
        .cloned();

    let (savings_rate, expense_ratio) = if summary.income.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            percent_of(summary.net_income, summary.income),
            summary
                .expenses
                .checked_div(summary.income)
                .unwrap_or(Decimal::MAX),
        )
    };

    let income_count = transactions.iter().filter(|t| t.is_income()).count();
    Insights {
        monthly_total,
        average_daily_spending,
        highest_spending_day,
        savings_rate,
        expense_ratio,
        weekly_change: weekly_change(&trend),
        transaction_count: transactions.len(),
        income_count,
        expense_count: transactions.len() - income_count,
    }
}

/// Percent change of the last seven days of `trend` against the seven days
/// before them; zero when the earlier week had no spending.
pub fn weekly_change(trend: &[DailySpending]) -> Decimal {
    let n = trend.len();
    let last = saturating_sum(trend[n.saturating_sub(7)..].iter().map(|d| d.amount));
    let prev = saturating_sum(
        trend[n.saturating_sub(14)..n.saturating_sub(7)]
            .iter()
            .map(|d| d.amount),
    );
    percent_of(last - prev, prev)
}

/// `part` as a percentage of `whole`. Zero when `whole` is zero; a ratio too
/// large for `Decimal` clamps to `MAX`/`MIN`.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}
