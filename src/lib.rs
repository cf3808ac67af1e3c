//! Taskline: task records, the vital-task / dashboard view engine, and the
//! HTTP service that serves them out of MongoDB.
//!
//! The engine modules (`vitality`, `grouping`, `stats`, `filtering`,
//! `dashboard`) are pure functions of a task snapshot and an injected clock.

pub mod app_state;
pub mod auth;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filtering;
pub mod grouping;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod schedule;
pub mod stats;
pub mod tasks;
pub mod vitality;

#[cfg(test)]
mod testing;

pub use dashboard::{dashboard, DashboardView};
pub use error::{ApiError, EngineError};
pub use filtering::{filter_and_sort, CategoryFilter, SortKey, StatusFilter, TaskFilterOptions};
pub use grouping::{due_label, group_by_due_status, vital_board, DueBuckets, DueLabel, VitalCard};
pub use stats::{compute_stats, StatusStats};
pub use vitality::{is_vital, vital_candidates};
