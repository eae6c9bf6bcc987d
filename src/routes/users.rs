// SPDX-License-Identifier: MIT

//! User routes, including the per-user activity listings.

use crate::db::ACTIVITY_COLUMNS;
use crate::error::{AppError, Result};
use crate::models::{Activity, SortKey, SortOrder, User, UserCreate, UserPublic, UserUpdate};
use crate::routes::{MessageResponse, PageQuery};
use crate::{metrics, projection, validation, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/{user_id}/activities", get(get_user_activities))
        .route(
            "/users/{user_id}/activities-to-plot",
            get(get_user_activities_to_plot),
        )
}

// ─── User CRUD ───────────────────────────────────────────────

/// Create a user. Returns the stored record including the email.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>)> {
    let errors = validation::user_create_errors(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let user = state.store.create_user(&payload).await?;
    tracing::info!(user_id = user.user_id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Paginated list of users. Emails stay hidden.
async fn get_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Vec<UserPublic>>> {
    let users = state.store.list_users(params.offset, params.limit).await?;
    Ok(Json(users))
}

/// Get a specific user by user_id.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserPublic>> {
    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserPublic {
        user_id: user.user_id,
        name: user.name,
    }))
}

/// Partially update a user; fields absent from the payload are unchanged.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<UserPublic>> {
    let errors = validation::user_update_errors(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let user = state
        .store
        .update_user(user_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserPublic {
        user_id: user.user_id,
        name: user.name,
    }))
}

/// Delete a user by user_id.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if !state.store.delete_user(user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id, "User deleted");
    Ok(Json(MessageResponse {
        message: format!("User_id {user_id} deleted"),
    }))
}

// ─── Per-user activities ─────────────────────────────────────

#[derive(Deserialize)]
struct UserActivitiesQuery {
    #[serde(default)]
    offset: i64,
    #[serde(default = "super::default_limit")]
    limit: i64,
    #[serde(default)]
    sort_by: SortKey,
    #[serde(default)]
    order_by: SortOrder,
}

/// Get a paginated list of one user's activities.
async fn get_user_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<UserActivitiesQuery>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state
        .store
        .list_activities_for_user(
            user_id,
            params.offset,
            params.limit,
            params.sort_by,
            params.order_by,
        )
        .await?;

    if activities.is_empty() {
        return Err(AppError::NotFound("No activities found".to_string()));
    }

    Ok(Json(activities))
}

#[derive(Deserialize)]
struct PlotQuery {
    /// Inclusive lower bound, "YYYY/MM/DD"
    start_date: Option<String>,
    /// Inclusive upper bound, "YYYY/MM/DD"
    end_date: Option<String>,
}

/// Get one user's activities enriched with derived plot metrics.
///
/// The pipeline: select all activity columns for the user within the date
/// range, project the positional rows into named records, then attach
/// pace, speed and a normalized timestamp to a copy of each record.
async fn get_user_activities_to_plot(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(params): Query<PlotQuery>,
) -> Result<Json<Vec<Map<String, Value>>>> {
    for (name, value) in [
        ("start_date", params.start_date.as_deref()),
        ("end_date", params.end_date.as_deref()),
    ] {
        if value.is_some_and(|date| !validation::date_valid(date)) {
            return Err(AppError::BadRequest(format!(
                "Invalid '{name}' parameter: must be YYYY/MM/DD"
            )));
        }
    }

    tracing::debug!(
        user_id,
        start_date = ?params.start_date,
        end_date = ?params.end_date,
        "Fetching activities to plot"
    );

    let rows = state
        .store
        .activity_rows_for_user(
            user_id,
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        )
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("No activities found".to_string()));
    }

    let columns: Vec<String> = ACTIVITY_COLUMNS
        .iter()
        .map(|column| (*column).to_string())
        .collect();
    let records = projection::project(rows, &columns)?;
    let enriched = metrics::enrich(&records)?;

    Ok(Json(enriched))
}
