// SPDX-License-Identifier: MIT

//! User account model.

use serde::{Deserialize, Serialize};

/// Stored user record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Email address (must contain '@')
    pub email: String,
}

/// Public projection of a user; the email stays hidden.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserPublic {
    pub user_id: i64,
    pub name: String,
}

/// Payload for creating a user. The user_id is assigned by the store.
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

/// Partial update for a user; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}
