// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vantage::db::MemoryStore;
use vantage::metrics::{
    daily_spending, insights, monthly_summary, percent_of, recent_transactions,
    spending_breakdown, total_balance, weekly_change,
};
use vantage::models::{
    Category, DailySpending, MAX_AMOUNT, NewTransaction, Transaction, TransactionType,
};
use vantage::store::Ledger;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, kind: TransactionType, category: Category, amount: Decimal, d: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        description: format!("tx {}", id),
        amount,
        r#type: kind,
        category,
        date: date(d),
        created_at: 0,
    }
}

fn october() -> Vec<Transaction> {
    vec![
        tx("1", TransactionType::Expense, Category::Food, dec!(1000), "2023-10-01"),
        tx("2", TransactionType::Expense, Category::Grocery, dec!(2000), "2023-10-01"),
        tx("3", TransactionType::Income, Category::Income, dec!(5000), "2023-10-02"),
    ]
}

#[test]
fn october_scenario() {
    let txs = october();
    let today = date("2023-10-15");

    assert_eq!(total_balance(&txs), dec!(2000));

    let month = monthly_summary(&txs, today);
    assert_eq!(month.income, dec!(5000));
    assert_eq!(month.expenses, dec!(3000));
    assert_eq!(month.net_income, dec!(2000));

    let breakdown = spending_breakdown(&txs);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].category, Category::Grocery);
    assert_eq!(breakdown[0].amount, dec!(2000));
    assert_eq!(breakdown[0].percentage.round_dp(1), dec!(66.7));
    assert_eq!(breakdown[1].category, Category::Food);
    assert_eq!(breakdown[1].percentage.round_dp(1), dec!(33.3));
    assert_eq!(breakdown[1].name, "Food & Dining");

    let trend = daily_spending(&txs, today);
    assert_eq!(trend.len(), 31);
    assert_eq!(trend[0].date, date("2023-10-01"));
    assert_eq!(trend[0].amount, dec!(3000));
    assert_eq!(trend[1].amount, Decimal::ZERO);
}

#[test]
fn balance_is_income_minus_expenses() {
    let mut txs = october();
    txs.push(tx("4", TransactionType::Expense, Category::Housing, dec!(80000.50), "2023-09-30"));
    let incomes: Decimal = txs.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: Decimal = txs.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
    assert_eq!(total_balance(&txs), incomes - expenses);
    assert!(total_balance(&txs) < Decimal::ZERO);
}

#[test]
fn percentages_sum_to_hundred() {
    let txs = vec![
        tx("1", TransactionType::Expense, Category::Food, dec!(10), "2023-10-01"),
        tx("2", TransactionType::Expense, Category::Health, dec!(10), "2023-10-03"),
        tx("3", TransactionType::Expense, Category::Transport, dec!(10), "2023-10-04"),
        tx("4", TransactionType::Expense, Category::Food, dec!(7.25), "2023-10-05"),
    ];
    let total: Decimal = spending_breakdown(&txs).iter().map(|c| c.percentage).sum();
    assert!((total - dec!(100)).abs() < dec!(0.0001));
}

#[test]
fn zero_expenses_give_zero_percentages() {
    let txs = vec![
        tx("1", TransactionType::Expense, Category::Food, Decimal::ZERO, "2023-10-01"),
        tx("2", TransactionType::Expense, Category::Health, Decimal::ZERO, "2023-10-02"),
    ];
    let breakdown = spending_breakdown(&txs);
    assert_eq!(breakdown.len(), 2);
    assert!(breakdown.iter().all(|c| c.percentage.is_zero()));
}

#[test]
fn breakdown_ties_keep_first_seen_order() {
    let txs = vec![
        tx("1", TransactionType::Expense, Category::Health, dec!(500), "2023-10-01"),
        tx("2", TransactionType::Expense, Category::Food, dec!(500), "2023-10-01"),
        tx("3", TransactionType::Expense, Category::Housing, dec!(900), "2023-10-01"),
    ];
    let order: Vec<Category> = spending_breakdown(&txs).iter().map(|c| c.category).collect();
    assert_eq!(order, vec![Category::Housing, Category::Health, Category::Food]);
}

#[test]
fn trend_length_matches_month_without_transactions() {
    assert_eq!(daily_spending(&[], date("2023-10-09")).len(), 31);
    assert_eq!(daily_spending(&[], date("2023-11-30")).len(), 30);
    assert_eq!(daily_spending(&[], date("2024-02-01")).len(), 29);
    assert_eq!(daily_spending(&[], date("2023-02-10")).len(), 28);
    assert!(
        daily_spending(&[], date("2023-10-09"))
            .iter()
            .all(|d| d.amount.is_zero())
    );
}

#[test]
fn trend_ignores_other_months_and_income() {
    let txs = vec![
        tx("1", TransactionType::Expense, Category::Food, dec!(100), "2023-09-30"),
        tx("2", TransactionType::Expense, Category::Food, dec!(100), "2022-10-05"),
        tx("3", TransactionType::Income, Category::Income, dec!(100), "2023-10-05"),
        tx("4", TransactionType::Expense, Category::Food, dec!(40), "2023-10-31"),
    ];
    let trend = daily_spending(&txs, date("2023-10-01"));
    let total: Decimal = trend.iter().map(|d| d.amount).sum();
    assert_eq!(total, dec!(40));
    assert_eq!(trend[30].date, date("2023-10-31"));
    assert_eq!(trend[30].amount, dec!(40));
}

#[test]
fn monthly_summary_is_zero_without_matches() {
    let s = monthly_summary(&october(), date("2024-01-15"));
    assert!(s.income.is_zero() && s.expenses.is_zero() && s.net_income.is_zero());
}

#[test]
fn aggregates_are_idempotent() {
    let txs = october();
    let today = date("2023-10-15");
    assert_eq!(spending_breakdown(&txs), spending_breakdown(&txs));
    assert_eq!(daily_spending(&txs, today), daily_spending(&txs, today));
    assert_eq!(monthly_summary(&txs, today), monthly_summary(&txs, today));
    assert_eq!(insights(&txs, today), insights(&txs, today));
    assert_eq!(txs, october());
}

#[test]
fn recent_sorts_by_date_and_keeps_list_order_on_ties() {
    let txs = vec![
        tx("a", TransactionType::Expense, Category::Food, dec!(1), "2023-10-02"),
        tx("old", TransactionType::Expense, Category::Food, dec!(1), "2023-09-01"),
        tx("b", TransactionType::Expense, Category::Food, dec!(1), "2023-10-02"),
        tx("new", TransactionType::Income, Category::Income, dec!(1), "2023-10-20"),
        tx("c", TransactionType::Expense, Category::Food, dec!(1), "2023-10-02"),
        tx("older", TransactionType::Expense, Category::Food, dec!(1), "2023-08-01"),
    ];
    let ids: Vec<&str> = recent_transactions(&txs, 5)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["new", "a", "b", "c", "old"]);
    assert_eq!(recent_transactions(&txs, 100).len(), 6);
}

#[test]
fn insights_for_october() {
    let i = insights(&october(), date("2023-10-15"));
    assert_eq!(i.monthly_total, dec!(3000));
    assert_eq!(i.average_daily_spending, dec!(3000));
    let highest = i.highest_spending_day.unwrap();
    assert_eq!(highest.date, date("2023-10-01"));
    assert_eq!(i.savings_rate, dec!(40));
    assert_eq!(i.expense_ratio, dec!(0.6));
    assert_eq!(i.weekly_change, Decimal::ZERO);
    assert_eq!((i.transaction_count, i.income_count, i.expense_count), (3, 1, 2));
}

#[test]
fn insights_guard_zero_income() {
    let txs = vec![tx("1", TransactionType::Expense, Category::Food, dec!(10), "2023-10-03")];
    let i = insights(&txs, date("2023-10-15"));
    assert!(i.savings_rate.is_zero());
    assert!(i.expense_ratio.is_zero());

    let empty = insights(&[], date("2023-10-15"));
    assert!(empty.average_daily_spending.is_zero());
    // all-zero month: first day is the maximum
    assert_eq!(empty.highest_spending_day.unwrap().date, date("2023-10-01"));
}

#[test]
fn weekly_change_compares_last_two_weeks() {
    let start = date("2023-10-01");
    let trend: Vec<DailySpending> = (0..14)
        .map(|i| DailySpending {
            date: start + chrono::Duration::days(i),
            amount: if i < 7 { dec!(100) } else { dec!(70) },
        })
        .collect();
    assert_eq!(weekly_change(&trend), dec!(-30));
    assert_eq!(weekly_change(&trend[..5]), Decimal::ZERO);
}

#[test]
fn largest_amounts_do_not_overflow() {
    let kv = MemoryStore::new();
    let mut ledger = Ledger::load(&kv);
    for category in [Category::Housing, Category::Housing, Category::Food] {
        ledger
            .add(NewTransaction {
                description: "Big".into(),
                amount: MAX_AMOUNT,
                r#type: TransactionType::Expense,
                category,
                date: date("2023-10-01"),
            })
            .unwrap();
    }
    let breakdown = spending_breakdown(ledger.items());
    assert_eq!(breakdown[0].category, Category::Housing);
    assert_eq!(breakdown[0].amount, MAX_AMOUNT * dec!(2));
    let total: Decimal = breakdown.iter().map(|c| c.percentage).sum();
    assert!((total - dec!(100)).abs() < dec!(0.0001));
    assert_eq!(total_balance(ledger.items()), MAX_AMOUNT * dec!(-3));
    insights(ledger.items(), date("2023-10-15"));
}

#[test]
fn saturated_sums_and_ratios_stay_in_range() {
    let txs = vec![
        tx("1", TransactionType::Expense, Category::Food, Decimal::MAX, "2023-10-01"),
        tx("2", TransactionType::Expense, Category::Food, Decimal::MAX, "2023-10-02"),
        tx("3", TransactionType::Income, Category::Income, dec!(1), "2023-10-02"),
    ];
    assert_eq!(total_balance(&txs[..2]), Decimal::MIN);
    let breakdown = spending_breakdown(&txs);
    assert_eq!(breakdown[0].amount, Decimal::MAX);
    assert_eq!(breakdown[0].percentage, dec!(100));

    let i = insights(&txs, date("2023-10-15"));
    assert_eq!(i.savings_rate, Decimal::MIN);
    assert_eq!(i.expense_ratio, Decimal::MAX);
}

#[test]
fn percent_of_guards() {
    assert_eq!(percent_of(dec!(1), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_of(dec!(45000), dec!(50000)), dec!(90));
    let tiny = dec!(0.0000000000000000000000000001);
    assert_eq!(percent_of(dec!(1), tiny), Decimal::MAX);
    assert_eq!(percent_of(dec!(-1), tiny), Decimal::MIN);
}
