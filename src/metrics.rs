// SPDX-License-Identifier: MIT

//! Derived activity metrics, computed at read time.
//!
//! Pace, speed and a plot-friendly timestamp are derived from the stored
//! `distance_km`, `moving_time` and `date` fields and attached to a copy of
//! each record. Stored records are never modified; enrichment exists purely
//! for display.

use serde_json::{Map, Value};

/// Errors from metric derivation.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("moving time {0:?} does not match format 'HH:MM:SS'")]
    InvalidDuration(String),

    #[error("pace {0:?} does not match format 'M:SS'")]
    InvalidPace(String),

    #[error("date {0:?} does not match format 'YYYY/MM/DD'")]
    InvalidDate(String),

    #[error("distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("activity record missing field '{0}'")]
    MissingField(&'static str),
}

/// Parse a "HH:MM:SS" duration into total whole seconds.
///
/// The total must fit in `u32`; durations beyond that are treated as
/// malformed rather than wrapping.
pub fn duration_to_seconds(moving_time: &str) -> Result<u32, MetricsError> {
    let invalid = || MetricsError::InvalidDuration(moving_time.to_string());

    let parts: Vec<&str> = moving_time.split(':').collect();
    let &[hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.parse().map_err(|_| invalid())?;

    let total = u64::from(seconds) + u64::from(minutes) * 60 + u64::from(hours) * 3600;
    u32::try_from(total).map_err(|_| invalid())
}

/// Pace in minutes per kilometre, rendered as "M:SS".
///
/// The minutes portion is not zero-padded ("6:00", "27:06"); the seconds
/// portion always has exactly two digits.
pub fn pace_mins_per_km(distance_km: f64, moving_time: &str) -> Result<String, MetricsError> {
    if distance_km <= 0.0 {
        return Err(MetricsError::NonPositiveDistance(distance_km));
    }

    let time_secs = duration_to_seconds(moving_time)?;
    let pace_secs_per_km = f64::from(time_secs) / distance_km;
    let pace_mins = (pace_secs_per_km / 60.0).floor() as u32;
    let pace_secs = (pace_secs_per_km % 60.0).floor() as u32;

    Ok(format!("{pace_mins}:{pace_secs:02}"))
}

/// Convert a "M:SS" pace string into decimal minutes, e.g. "6:53" -> 6.88.
/// Used by the frontend for plotting.
pub fn pace_to_float(pace: &str) -> Result<f64, MetricsError> {
    let invalid = || MetricsError::InvalidPace(pace.to_string());

    let parts: Vec<&str> = pace.split(':').collect();
    let &[minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.parse().map_err(|_| invalid())?;

    Ok(round2(f64::from(minutes) + f64::from(seconds) / 60.0))
}

/// Speed in kilometres per hour, rounded to two decimal places.
pub fn speed_km_per_hr(distance_km: f64, moving_time: &str) -> Result<f64, MetricsError> {
    if distance_km <= 0.0 {
        return Err(MetricsError::NonPositiveDistance(distance_km));
    }

    let time_hrs = f64::from(duration_to_seconds(moving_time)?) / 3600.0;
    Ok(round2(distance_km / time_hrs))
}

/// Rewrite a "YYYY/MM/DD" date as an ISO 8601 timestamp at midnight UTC.
///
/// This is pure field reordering; calendar validity is enforced when the
/// record is written, not here.
pub fn normalize_date(date: &str) -> Result<String, MetricsError> {
    let parts: Vec<&str> = date.split('/').collect();
    let &[year, month, day] = parts.as_slice() else {
        return Err(MetricsError::InvalidDate(date.to_string()));
    };

    Ok(format!("{year}-{month}-{day}T00:00:00.000Z"))
}

/// Enrich a batch of activity records with `pace_str_mps`, `pace_float_mps`,
/// `speed_kmphr` and `formatted_time`.
///
/// Each output record is a fresh copy of the input; order and count are
/// preserved. The whole batch fails on the first malformed record so callers
/// never see partially enriched results.
pub fn enrich(activities: &[Map<String, Value>]) -> Result<Vec<Map<String, Value>>, MetricsError> {
    activities
        .iter()
        .map(|activity| {
            let distance_km = activity
                .get("distance_km")
                .and_then(Value::as_f64)
                .ok_or(MetricsError::MissingField("distance_km"))?;
            let moving_time = activity
                .get("moving_time")
                .and_then(Value::as_str)
                .ok_or(MetricsError::MissingField("moving_time"))?;
            let date = activity
                .get("date")
                .and_then(Value::as_str)
                .ok_or(MetricsError::MissingField("date"))?;

            let pace_str = pace_mins_per_km(distance_km, moving_time)?;
            let pace_float = pace_to_float(&pace_str)?;
            let speed = speed_km_per_hr(distance_km, moving_time)?;
            let formatted_time = normalize_date(date)?;

            let mut enriched = activity.clone();
            enriched.insert("pace_str_mps".to_string(), Value::from(pace_str));
            enriched.insert("pace_float_mps".to_string(), Value::from(pace_float));
            enriched.insert("speed_kmphr".to_string(), Value::from(speed));
            enriched.insert("formatted_time".to_string(), Value::from(formatted_time));
            Ok(enriched)
        })
        .collect()
}

/// Round to two decimal places (half-away-from-zero).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
