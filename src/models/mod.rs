// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;
pub mod user;

pub use activity::{Activity, ActivityCreate, ActivityUpdate, SortKey, SortOrder};
pub use user::{User, UserCreate, UserPublic, UserUpdate};
