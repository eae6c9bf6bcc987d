//! Database layer (SQLite via sqlx).

pub mod store;

pub use store::Store;

/// Column order used by positional activity row queries.
///
/// The Row Projector pairs these names with row values positionally, so this
/// list must match the column list in the SQL exactly.
pub const ACTIVITY_COLUMNS: [&str; 10] = [
    "id",
    "user_id",
    "date",
    "time",
    "activity",
    "activity_type",
    "moving_time",
    "distance_km",
    "perceived_effort",
    "elevation_m",
];
