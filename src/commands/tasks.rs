// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::models::{NewTask, Priority, Status, SubTaskPatch, TaskPatch};
use crate::store::TaskBoard;
use crate::tasks::{TaskSort, filter_and_sort, stats};
use crate::utils::{maybe_print_json, parse_date, pretty_table, required, warn_unsaved};
use anyhow::Result;

pub fn handle(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(kv, sub)?,
        Some(("list", sub)) => list(kv, sub)?,
        Some(("update", sub)) => update(kv, sub)?,
        Some(("rm", sub)) => remove(kv, sub)?,
        Some(("stats", sub)) => show_stats(kv, sub)?,
        Some(("sub", sub)) => subtasks(kv, sub)?,
        _ => {}
    }
    Ok(())
}

fn opt_parse<T: std::str::FromStr>(sub: &clap::ArgMatches, name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match sub.get_one::<String>(name) {
        Some(s) => Ok(Some(s.parse::<T>()?)),
        None => Ok(None),
    }
}

fn add(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewTask {
        title: required(sub, "title")?.to_string(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        status: required(sub, "status")?.parse()?,
        priority: required(sub, "priority")?.parse()?,
        due_date: sub.get_one::<String>("due").map(|d| parse_date(d)).transpose()?,
    };
    let mut board = TaskBoard::load(kv);
    let task = board.add(new)?;
    println!("Added task '{}' id={}", task.title, task.id);
    warn_unsaved("task", board.persist_error());
    Ok(())
}

fn list(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let status: Option<Status> = opt_parse(sub, "status")?;
    let sort: TaskSort = required(sub, "sort")?.parse()?;
    let board = TaskBoard::load(kv);
    let data = filter_and_sort(board.items(), status, sort);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                let (done, total) = t.subtask_progress();
                vec![
                    t.title.clone(),
                    t.status.to_string(),
                    t.priority.to_string(),
                    t.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    format!("{}/{}", done, total),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Title", "Status", "Priority", "Due", "Subtasks", "Id"], rows)
        );
    }
    Ok(())
}

/// Patch built from `task update` flags; absent flags leave fields alone.
pub fn task_patch(sub: &clap::ArgMatches) -> Result<TaskPatch> {
    let due_date = if sub.get_flag("clear-due") {
        Some(None)
    } else {
        sub.get_one::<String>("due")
            .map(|d| parse_date(d).map(Some))
            .transpose()?
    };
    Ok(TaskPatch {
        title: sub.get_one::<String>("title").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        status: opt_parse::<Status>(sub, "status")?,
        priority: opt_parse::<Priority>(sub, "priority")?,
        due_date,
    })
}

fn update(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = task_patch(sub)?;
    let mut board = TaskBoard::load(kv);
    if board.update(id, patch) {
        println!("Updated task {}", id);
        warn_unsaved("task update", board.persist_error());
    } else {
        println!("No task with id {}", id);
    }
    Ok(())
}

fn remove(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let mut board = TaskBoard::load(kv);
    if board.delete(id) {
        println!("Removed task {}", id);
        warn_unsaved("task removal", board.persist_error());
    } else {
        println!("No task with id {}", id);
    }
    Ok(())
}

fn show_stats(kv: &dyn KeyValueStore, sub: &clap::ArgMatches) -> Result<()> {
    let board = TaskBoard::load(kv);
    let s = stats(board.items());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![vec![
            s.total.to_string(),
            s.pending.to_string(),
            s.running.to_string(),
            s.completed.to_string(),
        ]];
        println!(
            "{}",
            pretty_table(&["Total", "Pending", "Running", "Completed"], rows)
        );
    }
    Ok(())
}

fn subtasks(kv: &dyn KeyValueStore, m: &clap::ArgMatches) -> Result<()> {
    let mut board = TaskBoard::load(kv);
    match m.subcommand() {
        Some(("add", sub)) => {
            let task_id = required(sub, "task")?;
            match board.add_subtask(task_id, required(sub, "title")?)? {
                Some(s) => println!("Added subtask '{}' id={}", s.title, s.id),
                None => println!("No task with id {}", task_id),
            }
        }
        Some(("set", sub)) => {
            let patch = SubTaskPatch {
                title: sub.get_one::<String>("title").cloned(),
                status: opt_parse::<Status>(sub, "status")?,
            };
            let (task_id, sub_id) = (required(sub, "task")?, required(sub, "subtask")?);
            if board.update_subtask(task_id, sub_id, patch) {
                println!("Updated subtask {}", sub_id);
            } else {
                println!("No subtask {} on task {}", sub_id, task_id);
            }
        }
        Some(("rm", sub)) => {
            let (task_id, sub_id) = (required(sub, "task")?, required(sub, "subtask")?);
            if board.delete_subtask(task_id, sub_id) {
                println!("Removed subtask {}", sub_id);
            } else {
                println!("No subtask {} on task {}", sub_id, task_id);
            }
        }
        _ => {}
    }
    warn_unsaved("subtask change", board.persist_error());
    Ok(())
}
