// SPDX-License-Identifier: MIT

//! Free-standing payload validation.
//!
//! Validators run over the parsed request body before a domain record is
//! constructed, and collect the name of every failing field so the client
//! sees all problems in one response.

use crate::models::{ActivityCreate, ActivityUpdate, UserCreate, UserUpdate};
use chrono::{NaiveDate, NaiveTime};

/// Accepted activity kinds.
pub const VALID_ACTIVITIES: [&str; 2] = ["run", "ride"];

/// Check a calendar date against the fixed "YYYY/MM/DD" format.
pub fn date_valid(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y/%m/%d").is_ok()
}

/// Check a clock time against the fixed "HH:MM" format.
pub fn time_valid(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}

/// Check a moving time against the fixed "HH:MM:SS" format: exactly three
/// colon-separated non-negative integers whose total fits the metrics
/// parser. Sharing the parser keeps write-time checks and read-time
/// enrichment in agreement.
pub fn moving_time_valid(value: &str) -> bool {
    crate::metrics::duration_to_seconds(value).is_ok()
}

fn activity_kind_valid(value: &str) -> bool {
    VALID_ACTIVITIES.contains(&value)
}

fn perceived_effort_valid(value: i64) -> bool {
    (1..=10).contains(&value)
}

fn email_valid(value: &str) -> bool {
    value.contains('@')
}

/// Validate a new activity, returning the names of all failing fields.
pub fn activity_create_errors(payload: &ActivityCreate) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if !date_valid(&payload.date) {
        errors.push("date");
    }
    if !time_valid(&payload.time) {
        errors.push("time");
    }
    if !activity_kind_valid(&payload.activity) {
        errors.push("activity");
    }
    if !moving_time_valid(&payload.moving_time) {
        errors.push("moving_time");
    }
    if payload.distance_km <= 0.0 {
        errors.push("distance_km");
    }
    if !perceived_effort_valid(payload.perceived_effort) {
        errors.push("perceived_effort");
    }
    if payload.elevation_m.is_some_and(|elevation| elevation < 0) {
        errors.push("elevation_m");
    }
    errors
}

/// Validate an activity patch; only fields present in the payload are checked.
pub fn activity_update_errors(payload: &ActivityUpdate) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if payload.date.as_deref().is_some_and(|date| !date_valid(date)) {
        errors.push("date");
    }
    if payload.time.as_deref().is_some_and(|time| !time_valid(time)) {
        errors.push("time");
    }
    if payload
        .activity
        .as_deref()
        .is_some_and(|kind| !activity_kind_valid(kind))
    {
        errors.push("activity");
    }
    if payload
        .moving_time
        .as_deref()
        .is_some_and(|value| !moving_time_valid(value))
    {
        errors.push("moving_time");
    }
    if payload.distance_km.is_some_and(|distance| distance <= 0.0) {
        errors.push("distance_km");
    }
    if payload
        .perceived_effort
        .is_some_and(|effort| !perceived_effort_valid(effort))
    {
        errors.push("perceived_effort");
    }
    if payload.elevation_m.is_some_and(|elevation| elevation < 0) {
        errors.push("elevation_m");
    }
    errors
}

/// Validate a new user.
pub fn user_create_errors(payload: &UserCreate) -> Vec<&'static str> {
    if email_valid(&payload.email) {
        Vec::new()
    } else {
        vec!["email"]
    }
}

/// Validate a user patch; only fields present in the payload are checked.
pub fn user_update_errors(payload: &UserUpdate) -> Vec<&'static str> {
    if payload
        .email
        .as_deref()
        .is_some_and(|email| !email_valid(email))
    {
        vec!["email"]
    } else {
        Vec::new()
    }
}
