// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VantageError {
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Unknown transaction type '{0}', expected income|expense")]
    UnknownTransactionType(String),
    #[error("Unknown status '{0}', expected pending|running|completed")]
    UnknownStatus(String),
    #[error("Unknown priority '{0}', expected low|medium|high")]
    UnknownPriority(String),
    #[error("Unknown sort order '{0}'")]
    UnknownSort(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Input problems that block a record from being created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("Amount exceeds the limit of 10^18")]
    AmountTooLarge,
    #[error("Income must use the income category, found '{0}'")]
    IncomeCategory(String),
}
