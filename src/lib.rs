// SPDX-License-Identifier: MIT

//! Gymbox API: check-in validation and challenge ranking backend.
//!
//! This crate provides the backend for a gym membership app: time-windowed
//! check-in codes for class sessions, geofenced check-in validation,
//! challenge ranking, and membership payment cycles.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
