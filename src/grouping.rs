// src/grouping.rs

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::error::EngineError;
use crate::models::Task;
use crate::schedule::end_date;
use crate::vitality::vital_candidates;

/// Tasks partitioned by their end date relative to today.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueBuckets<T = Task> {
    pub overdue: Vec<T>,
    pub due_today: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for DueBuckets<T> {
    fn default() -> Self {
        DueBuckets {
            overdue: Vec::new(),
            due_today: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

impl<T> DueBuckets<T> {
    pub fn len(&self) -> usize {
        self.overdue.len() + self.due_today.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a deadline reads on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Overdue { days: i64 },
    DueToday,
    DueIn { days: i64 },
}

impl DueLabel {
    pub fn between(end: NaiveDate, today: NaiveDate) -> Self {
        let days = (end - today).num_days();
        match days.cmp(&0) {
            Ordering::Less => DueLabel::Overdue { days: -days },
            Ordering::Equal => DueLabel::DueToday,
            Ordering::Greater => DueLabel::DueIn { days },
        }
    }
}

fn plural(days: i64) -> &'static str {
    if days > 1 {
        "s"
    } else {
        ""
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DueLabel::Overdue { days } => write!(f, "{} day{} overdue", days, plural(days)),
            DueLabel::DueToday => f.write_str("Due today"),
            DueLabel::DueIn { days } => write!(f, "Due in {} day{}", days, plural(days)),
        }
    }
}

impl Serialize for DueLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A vital task together with its deadline label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalCard {
    #[serde(flatten)]
    pub task: Task,
    pub due_label: DueLabel,
}

pub fn due_label(task: &Task, now: NaiveDateTime) -> Result<DueLabel, EngineError> {
    Ok(DueLabel::between(end_date(task)?, now.date()))
}

/// Splits `tasks` into overdue, due-today and upcoming by comparing each end
/// date with `now`'s calendar day. Every task lands in exactly one bucket and
/// keeps its relative order.
pub fn group_by_due_status(
    tasks: &[Task],
    now: NaiveDateTime,
) -> Result<DueBuckets, EngineError> {
    let today = now.date();
    let mut buckets = DueBuckets::default();
    for task in tasks {
        let bucket = match end_date(task)?.cmp(&today) {
            Ordering::Less => &mut buckets.overdue,
            Ordering::Equal => &mut buckets.due_today,
            Ordering::Greater => &mut buckets.upcoming,
        };
        bucket.push(task.clone());
    }
    Ok(buckets)
}

/// The vital-tasks board: live vital candidates grouped by due status, each
/// carrying its label. The stored `isVital` flag is not consulted.
pub fn vital_board(
    tasks: &[Task],
    now: NaiveDateTime,
) -> Result<DueBuckets<VitalCard>, EngineError> {
    let grouped = group_by_due_status(&vital_candidates(tasks, now)?, now)?;
    let label = |bucket: Vec<Task>| -> Result<Vec<VitalCard>, EngineError> {
        bucket
            .into_iter()
            .map(|task| -> Result<VitalCard, EngineError> {
                let due_label = due_label(&task, now)?;
                Ok(VitalCard { task, due_label })
            })
            .collect()
    };
    Ok(DueBuckets {
        overdue: label(grouped.overdue)?,
        due_today: label(grouped.due_today)?,
        upcoming: label(grouped.upcoming)?,
    })
}
