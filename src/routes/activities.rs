// SPDX-License-Identifier: MIT

//! Activity CRUD routes.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityCreate, ActivityUpdate, SortKey, SortOrder};
use crate::routes::MessageResponse;
use crate::{validation, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(get_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Number of activities to skip
    #[serde(default)]
    offset: i64,
    /// Number of activities to return
    #[serde(default = "super::default_limit")]
    limit: i64,
    /// Column to sort by (closed set; anything else is rejected)
    #[serde(default)]
    sort_by: SortKey,
    /// Sort direction
    #[serde(default)]
    order_by: SortOrder,
}

/// Get a paginated list of activities.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<Vec<Activity>>> {
    tracing::debug!(
        offset = params.offset,
        limit = params.limit,
        sort_by = ?params.sort_by,
        order_by = ?params.order_by,
        "Fetching activities"
    );

    let activities = state
        .store
        .list_activities(params.offset, params.limit, params.sort_by, params.order_by)
        .await?;

    Ok(Json(activities))
}

/// Get a specific activity by id.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Activity>> {
    let activity = state
        .store
        .get_activity(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(Json(activity))
}

/// Create an activity. The payload is validated before it reaches the store;
/// all failing fields are reported together.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ActivityCreate>,
) -> Result<(StatusCode, Json<Activity>)> {
    let errors = validation::activity_create_errors(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let activity = state.store.create_activity(&payload).await?;
    tracing::info!(
        id = activity.id,
        user_id = activity.user_id,
        "Activity created"
    );
    Ok((StatusCode::CREATED, Json(activity)))
}

/// Partially update an activity; fields absent from the payload are
/// unchanged.
async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<ActivityUpdate>,
) -> Result<Json<Activity>> {
    let errors = validation::activity_update_errors(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let activity = state
        .store
        .update_activity(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(Json(activity))
}

/// Delete an activity by id.
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if !state.store.delete_activity(id).await? {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    tracing::info!(id, "Activity deleted");
    Ok(Json(MessageResponse {
        message: format!("Activity id {id} deleted"),
    }))
}
