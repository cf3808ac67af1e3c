// src/stats.rs

use serde::Serialize;

use crate::models::{Task, TaskStatus};

/// Share of tasks in each status, as whole percentages, plus the raw counts.
///
/// Each percentage is rounded on its own, so the three need not add up to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStats {
    pub completed_pct: u32,
    pub in_progress_pct: u32,
    pub not_started_pct: u32,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub total: usize,
}

/// `round(100 * count / total)` with halves rounded up; 0 when `total` is 0.
fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * count + total) / (2 * total)) as u32
}

pub fn compute_stats(tasks: &[Task]) -> StatusStats {
    let (mut completed, mut in_progress, mut not_started) = (0, 0, 0);
    for task in tasks {
        match task.status {
            TaskStatus::Completed => completed += 1,
            TaskStatus::InProgress => in_progress += 1,
            TaskStatus::NotStarted => not_started += 1,
        }
    }
    let total = tasks.len();
    StatusStats {
        completed_pct: percent(completed, total),
        in_progress_pct: percent(in_progress, total),
        not_started_pct: percent(not_started, total),
        completed,
        in_progress,
        not_started,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::testing::with;
    use rstest::rstest;

    fn of(statuses: &[TaskStatus]) -> Vec<Task> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| with(&i.to_string(), Priority::Low, *s, "2024-05-02"))
            .collect()
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(
            (stats.completed_pct, stats.in_progress_pct, stats.not_started_pct),
            (0, 0, 0)
        );
        assert_eq!(stats.total, 0);
    }

    #[test]
    fn all_completed_is_one_hundred_percent() {
        let stats = compute_stats(&of(&[TaskStatus::Completed; 5]));
        assert_eq!(
            (stats.completed_pct, stats.in_progress_pct, stats.not_started_pct),
            (100, 0, 0)
        );
    }

    #[test]
    fn two_completed_of_four() {
        use TaskStatus::*;
        let stats = compute_stats(&of(&[Completed, Completed, InProgress, NotStarted]));
        assert_eq!(stats.completed_pct, 50);
        assert_eq!(stats.in_progress_pct, 25);
        assert_eq!(stats.not_started_pct, 25);
        assert_eq!((stats.completed, stats.in_progress, stats.not_started), (2, 1, 1));
    }

    #[rstest]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 8, 13)]
    #[case(3, 8, 38)]
    #[case(1, 200, 1)]
    #[case(1, 201, 0)]
    fn rounds_half_up(#[case] count: usize, #[case] total: usize, #[case] expected: u32) {
        assert_eq!(percent(count, total), expected);
    }

    #[test]
    fn thirds_drift_from_one_hundred() {
        use TaskStatus::*;
        let stats = compute_stats(&of(&[Completed, InProgress, NotStarted]));
        assert_eq!(stats.completed_pct + stats.in_progress_pct + stats.not_started_pct, 99);
    }
}
