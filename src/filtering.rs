// src/filtering.rs

use std::str::FromStr;

use serde::Deserialize;

use crate::error::EngineError;
use crate::models::{Task, TaskStatus};
use crate::schedule::end_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    /// Anything not yet completed.
    Active,
    Completed,
}

impl StatusFilter {
    fn admits(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => task.status != TaskStatus::Completed,
            StatusFilter::Completed => task.status == TaskStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(EngineError::InvalidEnumValue {
                kind: "statusFilter",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `all`, or the id of the single category to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn admits(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => task.category_id() == Some(id.as_str()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SortKey {
    /// End date, earliest first.
    #[default]
    Date,
    /// Extreme, Moderate, Low.
    Priority,
    /// Not Started, In Progress, Completed.
    Status,
}

impl FromStr for SortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortKey::Date),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            other => Err(EngineError::InvalidEnumValue {
                kind: "sortKey",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Query options for the task list: `?status=active&category=c1&sort=priority`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFilterOptions {
    #[serde(default, rename = "status")]
    pub status_filter: StatusFilter,
    #[serde(default, rename = "category")]
    pub category_filter: CategoryFilter,
    #[serde(default, rename = "sort")]
    pub sort_key: SortKey,
}

/// Applies the status and category filters, then a stable sort on `sort_key`.
///
/// Returns a fresh list; `tasks` is left untouched. Sorting by date parses
/// every kept end date and fails on the first bad one.
pub fn filter_and_sort(
    tasks: &[Task],
    opts: &TaskFilterOptions,
) -> Result<Vec<Task>, EngineError> {
    let kept = tasks
        .iter()
        .filter(|t| opts.status_filter.admits(t) && opts.category_filter.admits(t));

    let sorted = match opts.sort_key {
        SortKey::Date => {
            let mut keyed = kept
                .map(|t| -> Result<_, EngineError> { Ok((end_date(t)?, t)) })
                .collect::<Result<Vec<_>, EngineError>>()?;
            keyed.sort_by_key(|(date, _)| *date);
            keyed.into_iter().map(|(_, t)| t.clone()).collect()
        }
        SortKey::Priority => {
            let mut list: Vec<Task> = kept.cloned().collect();
            list.sort_by_key(|t| t.priority.rank());
            list
        }
        SortKey::Status => {
            let mut list: Vec<Task> = kept.cloned().collect();
            list.sort_by_key(|t| t.status.rank());
            list
        }
    };
    Ok(sorted)
}
