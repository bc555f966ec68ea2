// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ValidationError, VantageError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(VantageError::UnknownTransactionType(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of transaction categories. Income transactions always carry
/// [`Category::Income`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Income,
    Food,
    Grocery,
    Housing,
    Transport,
    Entertainment,
    Health,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMeta {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Income,
        Category::Food,
        Category::Grocery,
        Category::Housing,
        Category::Transport,
        Category::Entertainment,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Food => "food",
            Category::Grocery => "grocery",
            Category::Housing => "housing",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
        }
    }

    pub fn meta(&self) -> CategoryMeta {
        let (name, icon, color) = match self {
            Category::Income => ("Income", "💰", "#22c55e"),
            Category::Food => ("Food & Dining", "🍽️", "#f97316"),
            Category::Grocery => ("Groceries", "🛒", "#16a34a"),
            Category::Housing => ("Housing", "🏠", "#3b82f6"),
            Category::Transport => ("Transport", "🚗", "#a855f7"),
            Category::Entertainment => ("Entertainment", "📊", "#ec4899"),
            Category::Health => ("Health", "💪", "#14b8a6"),
        };
        CategoryMeta { name, icon, color }
    }
}

/// Static metadata lookup by category tag.
pub fn category_meta(tag: &str) -> Result<CategoryMeta, VantageError> {
    Ok(tag.parse::<Category>()?.meta())
}

impl FromStr for Category {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| s.trim().eq_ignore_ascii_case(c.as_str()))
            .ok_or_else(|| VantageError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = VantageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
    pub created_at: i64,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    /// Invariants a stored or imported transaction must satisfy.
    pub fn check(&self) -> Result<(), ValidationError> {
        check_amount(self.amount)?;
        if self.is_income() && self.category != Category::Income {
            return Err(ValidationError::IncomeCategory(self.category.to_string()));
        }
        Ok(())
    }
}

/// Largest amount a transaction or budget may carry: 10^18.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

pub fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(())
}

/// A transaction as entered, before it gets an id and a creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        check_amount(self.amount)
    }

    /// Income always books under the income category.
    pub fn normalized(mut self) -> Self {
        if self.r#type == TransactionType::Income {
            self.category = Category::Income;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Running,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Running => "running",
            Status::Completed => "completed",
        }
    }

    // running first, finished last
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Status::Running => 0,
            Status::Pending => 1,
            Status::Completed => 2,
        }
    }
}

impl FromStr for Status {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "running" => Ok(Status::Running),
            "completed" => Ok(Status::Completed),
            other => Err(VantageError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub(crate) fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(VantageError::UnknownPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default, with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    pub created_at: i64,
}

impl Task {
    /// (completed, total) subtasks.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self
            .subtasks
            .iter()
            .filter(|s| s.status == Status::Completed)
            .count();
        (done, self.subtasks.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial task update. `None` leaves a field untouched; `due_date:
/// Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubTaskPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
}

impl SubTask {
    pub fn apply(&mut self, patch: SubTaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryData {
    pub category: Category,
    pub name: String,
    pub icon: String,
    pub percentage: Decimal,
    pub amount: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpending {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_income: Decimal,
}

// Legacy blobs store a missing due date as "".
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
