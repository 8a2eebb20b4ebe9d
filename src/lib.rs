// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: record workouts, view trends, guess activity types
//!
//! This crate provides the backend API: owner-scoped workout storage with
//! sparse filtering, dashboard statistics, and activity prediction backed by
//! a remote model with a local rule-based fallback.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;
use services::{PredictionGateway, WorkoutRepository};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub workouts: WorkoutRepository<Store>,
    pub predictor: PredictionGateway,
}
