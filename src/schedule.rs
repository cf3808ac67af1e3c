// src/schedule.rs

//! Parsing of the date and time strings a task carries.
//!
//! Tasks store `YYYY-MM-DD` dates and optional `HH:MM` times. A missing start
//! time means the start of the day and a missing end time means `23:59`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::EngineError;
use crate::models::Task;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn default_start_time() -> NaiveTime {
    NaiveTime::MIN
}

pub fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("23:59:00 is a valid clock time")
}

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| EngineError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parses an optional clock time; blank or absent yields `default`.
pub fn parse_time(
    field: &'static str,
    value: Option<&str>,
    default: NaiveTime,
) -> Result<NaiveTime, EngineError> {
    let raw = match value.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

pub fn end_date(task: &Task) -> Result<NaiveDate, EngineError> {
    parse_date("endDate", &task.end_date)
}

pub fn start_datetime(task: &Task) -> Result<NaiveDateTime, EngineError> {
    let date = parse_date("startDate", &task.start_date)?;
    let time = parse_time("startTime", task.start_time.as_deref(), default_start_time())?;
    Ok(date.and_time(time))
}

/// `endDate` combined with `endTime`, or `23:59` when no end time is set.
pub fn end_datetime(task: &Task) -> Result<NaiveDateTime, EngineError> {
    let date = end_date(task)?;
    let time = parse_time("endTime", task.end_time.as_deref(), default_end_time())?;
    Ok(date.and_time(time))
}

/// Fails with [`EngineError::ScheduleOutOfOrder`] when the task ends before
/// it starts.
pub fn ensure_chronological(task: &Task) -> Result<(), EngineError> {
    let start = start_datetime(task)?;
    let end = end_datetime(task)?;
    if end < start {
        return Err(EngineError::ScheduleOutOfOrder {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
