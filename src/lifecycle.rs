// src/lifecycle.rs

//! Building and mutating task records on the write path.
//!
//! Every write refreshes the stored `is_vital` snapshot against the clock of
//! the write, so the stored flag reflects the last save.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::EngineError;
use crate::models::{CategoryRef, CreateTaskRequest, Task, TaskEditRequest, TaskStatus};
use crate::schedule::ensure_chronological;
use crate::vitality::is_vital;

/// What an edit does to the task's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChange {
    Keep,
    Clear,
    Assign(CategoryRef),
}

/// How a requested `categoryId` resolves against the task's current one,
/// before the target category is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIntent<'a> {
    Keep,
    Clear,
    Assign(&'a str),
}

/// `None` leaves the category alone, `""` clears it, and naming the current
/// category is a no-op.
pub fn category_intent<'a>(
    current: Option<&str>,
    requested: Option<&'a str>,
) -> CategoryIntent<'a> {
    match requested {
        None => CategoryIntent::Keep,
        Some("") if current.is_none() => CategoryIntent::Keep,
        Some("") => CategoryIntent::Clear,
        Some(id) if Some(id) == current => CategoryIntent::Keep,
        Some(id) => CategoryIntent::Assign(id),
    }
}

/// `taskCount` adjustments for a task going from category `before` to
/// `after`. Creation is `(None, Some(_))`, deletion `(Some(_), None)`.
pub fn task_count_deltas<'a>(
    before: Option<&'a str>,
    after: Option<&'a str>,
) -> Vec<(&'a str, i64)> {
    if before == after {
        return Vec::new();
    }
    before
        .map(|id| (id, -1))
        .into_iter()
        .chain(after.map(|id| (id, 1)))
        .collect()
}

fn clean_notes(notes: Vec<String>) -> Vec<String> {
    notes.into_iter().filter(|n| !n.trim().is_empty()).collect()
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn refresh_vitality(task: &mut Task, now: DateTime<FixedOffset>) -> Result<(), EngineError> {
    task.is_vital = is_vital(task, now.naive_local())?;
    Ok(())
}

/// A fresh, not-started task built from a creation request.
pub fn new_task(
    id: String,
    req: CreateTaskRequest,
    category: Option<CategoryRef>,
    now: DateTime<FixedOffset>,
) -> Result<Task, EngineError> {
    let mut task = Task {
        id,
        title: req.title,
        description: req.description,
        priority: req.priority,
        status: TaskStatus::NotStarted,
        start_date: req.start_date,
        end_date: req.end_date,
        start_time: blank_to_none(req.start_time),
        end_time: blank_to_none(req.end_time),
        category,
        notes: clean_notes(req.notes),
        is_vital: false,
        completed_at: None,
        created_at: now.with_timezone(&Utc),
    };
    ensure_chronological(&task)?;
    refresh_vitality(&mut task, now)?;
    Ok(task)
}

/// Applies the fields present in `edit`. Identity, creation time and status
/// are not touched here.
pub fn apply_edit(
    task: &Task,
    edit: TaskEditRequest,
    category: CategoryChange,
    now: DateTime<FixedOffset>,
) -> Result<Task, EngineError> {
    let mut next = task.clone();
    if let Some(title) = edit.title {
        next.title = title;
    }
    if let Some(description) = edit.description {
        next.description = description;
    }
    if let Some(priority) = edit.priority {
        next.priority = priority;
    }
    if let Some(start_date) = edit.start_date {
        next.start_date = start_date;
    }
    if let Some(end_date) = edit.end_date {
        next.end_date = end_date;
    }
    if edit.start_time.is_some() {
        next.start_time = blank_to_none(edit.start_time);
    }
    if edit.end_time.is_some() {
        next.end_time = blank_to_none(edit.end_time);
    }
    if let Some(notes) = edit.notes {
        next.notes = clean_notes(notes);
    }
    match category {
        CategoryChange::Keep => {}
        CategoryChange::Clear => next.category = None,
        CategoryChange::Assign(snapshot) => next.category = Some(snapshot),
    }
    ensure_chronological(&next)?;
    refresh_vitality(&mut next, now)?;
    Ok(next)
}

/// Moves a task to `status`.
///
/// Any transition is accepted. Entering Completed stamps `completed_at`.
/// Leaving Completed clears it, and going back to Not Started (a restart)
/// also moves the start to `now`.
pub fn change_status(
    task: &Task,
    status: TaskStatus,
    now: DateTime<FixedOffset>,
) -> Result<Task, EngineError> {
    let mut next = task.clone();
    if next.status == status {
        return Ok(next);
    }
    match (next.status, status) {
        (_, TaskStatus::Completed) => {
            next.completed_at = Some(now.with_timezone(&Utc));
        }
        (TaskStatus::Completed, TaskStatus::NotStarted) => {
            let wall = now.naive_local();
            next.completed_at = None;
            next.start_date = wall.date().format("%Y-%m-%d").to_string();
            next.start_time = Some(wall.time().format("%H:%M").to_string());
        }
        (TaskStatus::Completed, _) => {
            next.completed_at = None;
        }
        _ => {}
    }
    next.status = status;
    refresh_vitality(&mut next, now)?;
    Ok(next)
}
