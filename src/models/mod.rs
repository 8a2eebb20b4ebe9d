// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod prediction;
pub mod stats;
pub mod workout;

pub use prediction::{PredictionInput, PredictionResult};
pub use stats::{DailyCount, StatsSummary};
pub use workout::{ActivityType, Workout, WorkoutFilterSpec, WorkoutForm};
