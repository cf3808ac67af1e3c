//! Fixtures shared by the unit tests.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::models::{CategoryRef, Priority, Task, TaskStatus};

pub fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").expect("fixture datetime")
}

pub fn utc(raw: &str) -> DateTime<Utc> {
    Utc.from_utc_datetime(&at(raw))
}

/// A Low priority, not started task running 2024-05-01 .. 2024-05-02.
pub fn task(id: &str) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {}", id),
        description: String::new(),
        priority: Priority::Low,
        status: TaskStatus::NotStarted,
        start_date: "2024-05-01".into(),
        end_date: "2024-05-02".into(),
        start_time: None,
        end_time: None,
        category: None,
        notes: Vec::new(),
        is_vital: false,
        completed_at: None,
        created_at: utc("2024-04-30 12:00"),
    }
}

pub fn with(id: &str, priority: Priority, status: TaskStatus, end_date: &str) -> Task {
    Task {
        priority,
        status,
        end_date: end_date.to_string(),
        ..task(id)
    }
}

pub fn in_category(mut t: Task, category_id: &str) -> Task {
    t.category = Some(CategoryRef {
        id: category_id.to_string(),
        name: category_id.to_uppercase(),
        color: "#FF5C5C".into(),
    });
    t
}

pub fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}
