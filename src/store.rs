// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{KeyValueStore, TASKS_KEY, TRANSACTIONS_KEY};
use crate::error::{ValidationError, VantageError};
use crate::models::{NewTask, NewTransaction, Task, TaskPatch, Transaction};
use anyhow::{Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// A record kept in a [`RecordStore`] list.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Storage key of the serialized list.
    const KEY: &'static str;
    /// Input accepted by [`RecordStore::add`].
    type New;

    fn id(&self) -> &str;
    fn create(new: Self::New, id: String, created_at: i64) -> Result<Self, VantageError>;

    /// Invariants checked on records read back from storage or an import.
    fn validate_stored(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Records that accept partial updates.
pub trait Patchable: Record {
    type Patch;

    fn apply(&mut self, patch: Self::Patch);
}

impl Record for Transaction {
    const KEY: &'static str = TRANSACTIONS_KEY;
    type New = NewTransaction;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(new: NewTransaction, id: String, created_at: i64) -> Result<Self, VantageError> {
        new.validate()?;
        let new = new.normalized();
        Ok(Transaction {
            id,
            description: new.description.trim().to_string(),
            amount: new.amount,
            r#type: new.r#type,
            category: new.category,
            date: new.date,
            created_at,
        })
    }

    fn validate_stored(&self) -> Result<(), ValidationError> {
        self.check()
    }
}

impl Record for Task {
    const KEY: &'static str = TASKS_KEY;
    type New = NewTask;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(new: NewTask, id: String, created_at: i64) -> Result<Self, VantageError> {
        new.validate()?;
        Ok(Task {
            id,
            title: new.title.trim().to_string(),
            description: new.description,
            status: new.status,
            priority: new.priority,
            due_date: new.due_date,
            subtasks: Vec::new(),
            created_at,
        })
    }
}

impl Patchable for Task {
    type Patch = TaskPatch;

    fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due) = patch.due_date {
            self.due_date = due;
        }
    }
}

/// Parse a JSON list of records and check each one's invariants.
pub fn parse_records<R: Record>(raw: &str) -> Result<Vec<R>> {
    let items: Vec<R> = serde_json::from_str(raw)?;
    for item in &items {
        item.validate_stored()
            .map_err(|e| anyhow!("record {}: {}", item.id(), e))?;
    }
    Ok(items)
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// In-memory record list mirrored to one key of a [`KeyValueStore`].
///
/// Every mutation rewrites the whole list. A failed write is logged and kept
/// in [`persist_error`](Self::persist_error); the in-memory change stands.
pub struct RecordStore<'a, R: Record> {
    kv: &'a dyn KeyValueStore,
    items: Vec<R>,
    persist_error: Option<String>,
}

pub type Ledger<'a> = RecordStore<'a, Transaction>;
pub type TaskBoard<'a> = RecordStore<'a, Task>;

impl<'a, R: Record> RecordStore<'a, R> {
    /// Load the list stored under `R::KEY`. Missing, unreadable or malformed
    /// data yields an empty list.
    pub fn load(kv: &'a dyn KeyValueStore) -> Self {
        let items = match kv.get(R::KEY) {
            Ok(Some(raw)) => match parse_records::<R>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!(key = R::KEY, error = %e, "discarding malformed stored data");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = R::KEY, error = %e, "could not read stored data");
                Vec::new()
            }
        };
        debug!(key = R::KEY, count = items.len(), "loaded records");
        Self {
            kv,
            items,
            persist_error: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Create a record with a fresh id and timestamp and put it at the front.
    pub fn add(&mut self, new: R::New) -> Result<&R, VantageError> {
        let record = R::create(new, new_id(), now_millis())?;
        debug!(key = R::KEY, id = record.id(), "adding record");
        self.items.insert(0, record);
        self.persist();
        Ok(&self.items[0])
    }

    /// Remove the record with `id`. Returns false when nothing matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id() != id);
        if self.items.len() == before {
            return false;
        }
        debug!(key = R::KEY, id, "deleted record");
        self.persist();
        true
    }

    pub fn replace_all(&mut self, items: Vec<R>) {
        self.items = items;
        self.persist();
    }

    /// Append records whose id is not present yet. Returns how many were added.
    pub fn merge(&mut self, items: Vec<R>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(|r| r.id().to_string()).collect();
        let mut added = 0;
        for item in items {
            if seen.insert(item.id().to_string()) {
                self.items.push(item);
                added += 1;
            }
        }
        if added > 0 {
            self.persist();
        }
        added
    }

    /// Drop the stored blob and empty the list.
    pub fn clear(&mut self) -> Result<()> {
        self.kv.remove(R::KEY)?;
        self.items.clear();
        self.persist_error = None;
        Ok(())
    }

    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    /// Run `f` on the record with `id` and persist. `None` when absent.
    pub(crate) fn modify<T>(&mut self, id: &str, f: impl FnOnce(&mut R) -> T) -> Option<T> {
        let record = self.items.iter_mut().find(|r| r.id() == id)?;
        let out = f(record);
        self.persist();
        Some(out)
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(anyhow::Error::from)
            .and_then(|raw| self.kv.put(R::KEY, &raw));
        match result {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                error!(key = R::KEY, error = %e, "failed to persist records");
                self.persist_error = Some(e.to_string());
            }
        }
    }
}

impl<R: Patchable> RecordStore<'_, R> {
    /// Merge `patch` into the record with `id`. Returns false when absent.
    pub fn update(&mut self, id: &str, patch: R::Patch) -> bool {
        self.modify(id, |r| r.apply(patch)).is_some()
    }
}
