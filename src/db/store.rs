// SPDX-License-Identifier: MIT

//! SQLite-backed storage for users and activities.
//!
//! The `Store` wraps a connection pool and is injected into handlers via
//! shared state; each query acquires a connection from the pool and releases
//! it on every exit path, including errors.

use std::str::FromStr;

use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use super::ACTIVITY_COLUMNS;
use crate::models::{
    Activity, ActivityCreate, ActivityUpdate, SortKey, SortOrder, User, UserCreate, UserPublic,
    UserUpdate,
};

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if missing) the database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Open an isolated in-memory database for tests.
    ///
    /// A single never-recycled connection, so every query sees the same data.
    pub async fn connect_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(user_id),
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                activity TEXT NOT NULL,
                activity_type TEXT NOT NULL,
                moving_time TEXT NOT NULL,
                distance_km REAL NOT NULL,
                perceived_effort INTEGER NOT NULL,
                elevation_m INTEGER
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_activities_user_id ON activities(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn create_user(&self, user: &UserCreate) -> Result<User, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING user_id, name, email",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_users(&self, offset: i64, limit: i64) -> Result<Vec<UserPublic>, sqlx::Error> {
        sqlx::query_as("SELECT user_id, name FROM users ORDER BY user_id LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as("SELECT user_id, name, email FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Apply a partial update; absent fields keep their stored values.
    /// Returns `None` if the user does not exist.
    pub async fn update_user(
        &self,
        user_id: i64,
        update: &UserUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE user_id = $1
            RETURNING user_id, name, email
            ",
        )
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns whether a row was deleted.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ─── Activities ──────────────────────────────────────────────

    pub async fn create_activity(&self, activity: &ActivityCreate) -> Result<Activity, sqlx::Error> {
        sqlx::query_as(&format!(
            r"
            INSERT INTO activities
                (user_id, date, time, activity, activity_type, moving_time,
                 distance_km, perceived_effort, elevation_m)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            ",
            ACTIVITY_COLUMNS.join(", ")
        ))
        .bind(activity.user_id)
        .bind(&activity.date)
        .bind(&activity.time)
        .bind(&activity.activity)
        .bind(&activity.activity_type)
        .bind(&activity.moving_time)
        .bind(activity.distance_km)
        .bind(activity.perceived_effort)
        .bind(activity.elevation_m)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_activity(&self, id: i64) -> Result<Option<Activity>, sqlx::Error> {
        sqlx::query_as(&format!(
            "SELECT {} FROM activities WHERE id = $1",
            ACTIVITY_COLUMNS.join(", ")
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Paginated activity listing. The sort column comes from the closed
    /// `SortKey` enum, never from raw request input.
    pub async fn list_activities(
        &self,
        offset: i64,
        limit: i64,
        sort_by: SortKey,
        order_by: SortOrder,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM activities ORDER BY {} {} LIMIT $1 OFFSET $2",
            ACTIVITY_COLUMNS.join(", "),
            sort_by.column(),
            order_by.sql(),
        );
        sqlx::query_as(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Paginated listing of one user's activities.
    pub async fn list_activities_for_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
        sort_by: SortKey,
        order_by: SortOrder,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM activities WHERE user_id = $1 ORDER BY {} {} LIMIT $2 OFFSET $3",
            ACTIVITY_COLUMNS.join(", "),
            sort_by.column(),
            order_by.sql(),
        );
        sqlx::query_as(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Apply a partial update; absent fields keep their stored values.
    /// Returns `None` if the activity does not exist.
    pub async fn update_activity(
        &self,
        id: i64,
        update: &ActivityUpdate,
    ) -> Result<Option<Activity>, sqlx::Error> {
        sqlx::query_as(&format!(
            r"
            UPDATE activities SET
                user_id = COALESCE($2, user_id),
                date = COALESCE($3, date),
                time = COALESCE($4, time),
                activity = COALESCE($5, activity),
                activity_type = COALESCE($6, activity_type),
                moving_time = COALESCE($7, moving_time),
                distance_km = COALESCE($8, distance_km),
                perceived_effort = COALESCE($9, perceived_effort),
                elevation_m = COALESCE($10, elevation_m)
            WHERE id = $1
            RETURNING {}
            ",
            ACTIVITY_COLUMNS.join(", ")
        ))
        .bind(id)
        .bind(update.user_id)
        .bind(&update.date)
        .bind(&update.time)
        .bind(&update.activity)
        .bind(&update.activity_type)
        .bind(&update.moving_time)
        .bind(update.distance_km)
        .bind(update.perceived_effort)
        .bind(update.elevation_m)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns whether a row was deleted.
    pub async fn delete_activity(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch raw positional activity rows for one user, optionally bounded
    /// by an inclusive date range.
    ///
    /// Values follow `ACTIVITY_COLUMNS` order; the Row Projector turns them
    /// into named records. Dates compare as text, which matches calendar
    /// order for the fixed zero-padded "YYYY/MM/DD" format.
    pub async fn activity_rows_for_user(
        &self,
        user_id: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Vec<Value>>, sqlx::Error> {
        let query = format!(
            r"
            SELECT {} FROM activities
            WHERE user_id = $1
              AND ($2 IS NULL OR date >= $2)
              AND ($3 IS NULL OR date <= $3)
            ORDER BY date, id
            ",
            ACTIVITY_COLUMNS.join(", ")
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_values).collect()
    }
}

/// Decode a storage row into positional JSON values, in `ACTIVITY_COLUMNS`
/// order.
fn row_values(row: &SqliteRow) -> Result<Vec<Value>, sqlx::Error> {
    ACTIVITY_COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = match *column {
                "distance_km" => Value::from(row.try_get::<f64, _>(idx)?),
                "elevation_m" => row
                    .try_get::<Option<i64>, _>(idx)?
                    .map_or(Value::Null, Value::from),
                "id" | "user_id" | "perceived_effort" => {
                    Value::from(row.try_get::<i64, _>(idx)?)
                }
                _ => Value::from(row.try_get::<String, _>(idx)?),
            };
            Ok(value)
        })
        .collect()
}
