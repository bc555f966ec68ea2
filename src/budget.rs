// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{BUDGETS_KEY, KeyValueStore};
use crate::error::ValidationError;
use crate::metrics::{monthly_summary, percent_of, spending_breakdown};
use crate::models::{Category, Transaction, check_amount};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, warn};

pub fn default_budgets() -> BTreeMap<Category, Decimal> {
    BTreeMap::from([
        (Category::Income, Decimal::ZERO),
        (Category::Food, Decimal::from(50_000)),
        (Category::Grocery, Decimal::from(30_000)),
        (Category::Housing, Decimal::from(80_000)),
        (Category::Transport, Decimal::from(20_000)),
        (Category::Entertainment, Decimal::from(30_000)),
        (Category::Health, Decimal::from(15_000)),
    ])
}

/// Monthly limits per category, stored as one JSON object.
pub struct BudgetBook<'a> {
    kv: &'a dyn KeyValueStore,
    limits: BTreeMap<Category, Decimal>,
    persist_error: Option<String>,
}

impl<'a> BudgetBook<'a> {
    pub fn load(kv: &'a dyn KeyValueStore) -> Self {
        let mut limits = default_budgets();
        match kv.get(BUDGETS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeMap<Category, Decimal>>(&raw) {
                Ok(stored) => limits.extend(stored),
                Err(e) => warn!(key = BUDGETS_KEY, error = %e, "discarding malformed budgets"),
            },
            Ok(None) => {}
            Err(e) => warn!(key = BUDGETS_KEY, error = %e, "could not read budgets"),
        }
        Self {
            kv,
            limits,
            persist_error: None,
        }
    }

    pub fn limits(&self) -> &BTreeMap<Category, Decimal> {
        &self.limits
    }

    pub fn get(&self, category: Category) -> Decimal {
        self.limits.get(&category).copied().unwrap_or_default()
    }

    pub fn set(&mut self, category: Category, amount: Decimal) -> Result<(), ValidationError> {
        check_amount(amount)?;
        self.limits.insert(category, amount);
        let result = serde_json::to_string(&self.limits)
            .map_err(anyhow::Error::from)
            .and_then(|raw| self.kv.put(BUDGETS_KEY, &raw));
        match result {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                error!(key = BUDGETS_KEY, error = %e, "failed to persist budgets");
                self.persist_error = Some(e.to_string());
            }
        }
        Ok(())
    }

    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    pub fn reset(&mut self) -> anyhow::Result<()> {
        self.kv.remove(BUDGETS_KEY)?;
        self.limits = default_budgets();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    OnTrack,
    Warning,
    Over,
}

impl BudgetLevel {
    pub fn for_usage(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            BudgetLevel::Over
        } else if percentage >= Decimal::from(80) {
            BudgetLevel::Warning
        } else {
            BudgetLevel::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::OnTrack => "on track",
            BudgetLevel::Warning => "warning",
            BudgetLevel::Over => "over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetItem {
    pub category: Category,
    pub name: String,
    pub icon: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub level: BudgetLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub items: Vec<BudgetItem>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub usage: Decimal,
}

/// Spending against each non-income budget for the month containing `today`,
/// largest budget first.
pub fn budget_report(
    limits: &BTreeMap<Category, Decimal>,
    transactions: &[Transaction],
    today: NaiveDate,
) -> BudgetReport {
    let this_month: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date.year() == today.year() && t.date.month() == today.month())
        .cloned()
        .collect();
    let spent_by_category: BTreeMap<Category, Decimal> = spending_breakdown(&this_month)
        .into_iter()
        .map(|c| (c.category, c.amount))
        .collect();

    let mut items: Vec<BudgetItem> = Category::ALL
        .into_iter()
        .filter(|c| *c != Category::Income)
        .map(|category| {
            let meta = category.meta();
            let budget = limits.get(&category).copied().unwrap_or_default();
            let spent = spent_by_category.get(&category).copied().unwrap_or_default();
            let percentage = percent_of(spent, budget);
            BudgetItem {
                category,
                name: meta.name.to_string(),
                icon: meta.icon.to_string(),
                budget,
                spent,
                percentage,
                level: BudgetLevel::for_usage(percentage),
            }
        })
        .collect();
    items.sort_by(|a, b| b.budget.cmp(&a.budget));

    let total_budget = items
        .iter()
        .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.budget));
    let total_spent = monthly_summary(transactions, today).expenses;
    BudgetReport {
        items,
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
        usage: percent_of(total_spent, total_budget),
    }
}
