//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use stampgraph::records::VisitRecord;

/// Timestamp `m` minutes into a fixed reference day (2023-01-01 10:00).
pub fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(10, minute, 0)
        .unwrap()
}

/// Single record helper.
pub fn record(user: &str, point: &str, minute: u32) -> VisitRecord {
    VisitRecord::new(user, point, at(minute))
}

/// Records for one user walking the given points one minute apart.
pub fn walk(user: &str, points: &[&str]) -> Vec<VisitRecord> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| record(user, p, i as u32))
        .collect()
}

/// The reference scenario: users 1 and 2, points A/B/C.
pub fn reference_records() -> Vec<VisitRecord> {
    vec![
        record("1", "A", 0),
        record("1", "B", 5),
        record("2", "A", 10),
        record("2", "C", 15),
    ]
}
