// SPDX-License-Identifier: MIT

//! Pace-Tracker: log runs and rides, get pace and speed back.
//!
//! This crate provides the backend API for storing exercise activities per
//! user and deriving display metrics (pace, speed, plot timestamps) when
//! they are read back.

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod projection;
pub mod routes;
pub mod validation;

use config::Config;
use db::Store;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}
