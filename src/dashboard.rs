// src/dashboard.rs

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::EngineError;
use crate::grouping::{vital_board, DueBuckets, VitalCard};
use crate::models::Task;
use crate::stats::{compute_stats, StatusStats};

/// Everything the dashboard page shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: StatusStats,
    /// Open tasks in snapshot order.
    pub active: Vec<Task>,
    pub completed: Vec<Task>,
    pub vital: DueBuckets<VitalCard>,
}

pub fn dashboard(tasks: &[Task], now: NaiveDateTime) -> Result<DashboardView, EngineError> {
    let (completed, active): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(Task::is_completed);
    Ok(DashboardView {
        stats: compute_stats(tasks),
        active,
        completed,
        vital: vital_board(tasks, now)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskStatus};
    use crate::testing::{at, ids, with};

    #[test]
    fn splits_open_and_done_and_counts() {
        let tasks = vec![
            with("a", Priority::Extreme, TaskStatus::NotStarted, "2024-05-09"),
            with("b", Priority::Low, TaskStatus::Completed, "2024-05-09"),
            with("c", Priority::Moderate, TaskStatus::InProgress, "2024-05-20"),
            with("d", Priority::Extreme, TaskStatus::Completed, "2024-05-10"),
        ];
        let view = dashboard(&tasks, at("2024-05-10 12:00")).unwrap();

        assert_eq!(ids(&view.active), vec!["a", "c"]);
        assert_eq!(ids(&view.completed), vec!["b", "d"]);
        assert_eq!(view.stats.completed_pct, 50);
        assert_eq!(view.stats.in_progress_pct, 25);
        assert_eq!(view.vital.overdue.len(), 1);
        assert_eq!(view.vital.len(), 1);
    }

    #[test]
    fn empty_snapshot_renders() {
        let view = dashboard(&[], at("2024-05-10 12:00")).unwrap();
        assert_eq!(view.stats, StatusStats::default());
        assert!(view.active.is_empty() && view.vital.is_empty());
    }
}
