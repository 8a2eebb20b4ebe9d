// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod classifier;
pub mod filter;
pub mod prediction;
pub mod workouts;

pub use classifier::classify;
pub use filter::build_predicates;
pub use prediction::{PredictionError, PredictionGateway};
pub use workouts::WorkoutRepository;
