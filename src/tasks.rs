// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ValidationError, VantageError};
use crate::models::{Status, SubTask, SubTaskPatch, Task};
use crate::store::{TaskBoard, new_id, now_millis};
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

impl TaskBoard<'_> {
    /// Append a pending subtask to `task_id`. `Ok(None)` when the task is absent.
    pub fn add_subtask(&mut self, task_id: &str, title: &str) -> Result<Option<SubTask>, VantageError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let sub = SubTask {
            id: new_id(),
            title: title.trim().to_string(),
            status: Status::Pending,
            created_at: now_millis(),
        };
        Ok(self.modify(task_id, |t| {
            t.subtasks.push(sub.clone());
            sub
        }))
    }

    pub fn update_subtask(&mut self, task_id: &str, subtask_id: &str, patch: SubTaskPatch) -> bool {
        if !self.has_subtask(task_id, subtask_id) {
            return false;
        }
        self.modify(task_id, |t| {
            if let Some(s) = t.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                s.apply(patch);
            }
        })
        .is_some()
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        if !self.has_subtask(task_id, subtask_id) {
            return false;
        }
        self.modify(task_id, |t| t.subtasks.retain(|s| s.id != subtask_id))
            .is_some()
    }

    fn has_subtask(&self, task_id: &str, subtask_id: &str) -> bool {
        self.find(task_id)
            .is_some_and(|t| t.subtasks.iter().any(|s| s.id == subtask_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSort {
    Newest,
    Oldest,
    Priority,
    DueDate,
    Status,
}

impl FromStr for TaskSort {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(TaskSort::Newest),
            "oldest" => Ok(TaskSort::Oldest),
            "priority" => Ok(TaskSort::Priority),
            "due" | "duedate" | "due-date" => Ok(TaskSort::DueDate),
            "status" => Ok(TaskSort::Status),
            other => Err(VantageError::UnknownSort(other.to_string())),
        }
    }
}

/// Tasks matching `status` (all when `None`), ordered by `sort`. Ties keep
/// list order.
pub fn filter_and_sort(tasks: &[Task], status: Option<Status>, sort: TaskSort) -> Vec<&Task> {
    let mut out: Vec<&Task> = tasks
        .iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .collect();
    out.sort_by(|a, b| match sort {
        TaskSort::Newest => b.created_at.cmp(&a.created_at),
        TaskSort::Oldest => a.created_at.cmp(&b.created_at),
        TaskSort::Priority => a.priority.rank().cmp(&b.priority.rank()),
        TaskSort::Status => a.status.rank().cmp(&b.status.rank()),
        TaskSort::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    });
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
}

pub fn stats(tasks: &[Task]) -> TaskStats {
    let mut s = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };
    for t in tasks {
        match t.status {
            Status::Pending => s.pending += 1,
            Status::Running => s.running += 1,
            Status::Completed => s.completed += 1,
        }
    }
    s
}
