// SPDX-License-Identifier: MIT

//! Activity model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored activity record.
///
/// Date/time fields are kept as fixed-format strings ("YYYY/MM/DD",
/// "HH:MM", "HH:MM:SS"); formats are enforced by validation at write time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Calendar date, "YYYY/MM/DD"
    pub date: String,
    /// Clock time, "HH:MM"
    pub time: String,
    /// Activity kind: "run" or "ride"
    pub activity: String,
    /// Free-text subtype (e.g. "trail", "road")
    pub activity_type: String,
    /// Elapsed moving duration, "HH:MM:SS"
    pub moving_time: String,
    /// Distance in kilometres (positive)
    pub distance_km: f64,
    /// Subjective exertion, 1 (easiest) to 10 (hardest)
    pub perceived_effort: i64,
    /// Elevation gain in metres
    pub elevation_m: Option<i64>,
}

/// Payload for creating an activity. The id is assigned by the store.
#[derive(Debug, Deserialize)]
pub struct ActivityCreate {
    pub user_id: i64,
    pub date: String,
    pub time: String,
    pub activity: String,
    pub activity_type: String,
    pub moving_time: String,
    pub distance_km: f64,
    pub perceived_effort: i64,
    pub elevation_m: Option<i64>,
}

/// Partial update for an activity; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct ActivityUpdate {
    pub user_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub activity: Option<String>,
    pub activity_type: Option<String>,
    pub moving_time: Option<String>,
    pub distance_km: Option<f64>,
    pub perceived_effort: Option<i64>,
    pub elevation_m: Option<i64>,
}

/// Permitted sort keys for activity listings.
///
/// A closed enum rather than a raw column string: anything outside this set
/// is rejected when the query string is deserialized, before it can reach
/// the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    UserId,
    Date,
    Time,
    Activity,
    ActivityType,
    MovingTime,
    DistanceKm,
    PerceivedEffort,
    ElevationM,
}

impl SortKey {
    /// Storage column backing this sort key.
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::UserId => "user_id",
            SortKey::Date => "date",
            SortKey::Time => "time",
            SortKey::Activity => "activity",
            SortKey::ActivityType => "activity_type",
            SortKey::MovingTime => "moving_time",
            SortKey::DistanceKm => "distance_km",
            SortKey::PerceivedEffort => "perceived_effort",
            SortKey::ElevationM => "elevation_m",
        }
    }
}

/// Sort direction for activity listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_rejects_unknown_column() {
        let result: Result<SortKey, _> = serde_json::from_str("\"testing\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_key_maps_to_column() {
        let key: SortKey = serde_json::from_str("\"distance_km\"").unwrap();
        assert_eq!(key, SortKey::DistanceKm);
        assert_eq!(key.column(), "distance_km");
    }

    #[test]
    fn test_sort_order_accepts_both_cases() {
        let lower: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        let upper: SortOrder = serde_json::from_str("\"DESC\"").unwrap();
        assert_eq!(lower, SortOrder::Desc);
        assert_eq!(upper, SortOrder::Desc);
    }
}
