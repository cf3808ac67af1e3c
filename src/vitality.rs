// src/vitality.rs

use chrono::{Duration, NaiveDateTime};

use crate::error::EngineError;
use crate::models::{Priority, Task};
use crate::schedule::end_datetime;

/// How far ahead of `now` an Extreme task's deadline may lie and still be vital.
pub const VITAL_WINDOW_DAYS: i64 = 3;

/// True iff the task is Extreme priority and its end (date + end time,
/// `23:59` by default) is at or before `now + 3 days`.
///
/// Non-Extreme tasks are never vital and their dates are not inspected.
/// Overdue Extreme tasks are vital.
pub fn is_vital(task: &Task, now: NaiveDateTime) -> Result<bool, EngineError> {
    if task.priority != Priority::Extreme {
        return Ok(false);
    }
    let end = end_datetime(task)?;
    Ok(end <= now + Duration::days(VITAL_WINDOW_DAYS))
}

/// Open Extreme tasks that are vital right now, earliest deadline first.
///
/// The sort is stable, so tasks sharing an end instant keep snapshot order.
pub fn vital_candidates(tasks: &[Task], now: NaiveDateTime) -> Result<Vec<Task>, EngineError> {
    let mut keyed = Vec::new();
    for task in tasks {
        if task.priority != Priority::Extreme || task.is_completed() {
            continue;
        }
        if is_vital(task, now)? {
            keyed.push((end_datetime(task)?, task));
        }
    }
    keyed.sort_by_key(|(end, _)| *end);
    Ok(keyed.into_iter().map(|(_, task)| task.clone()).collect())
}
