// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// The closed set of activities a workout can record.
///
/// Declaration order is the canonical order used for stats keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityType {
    Running,
    Cycling,
    Walking,
    #[serde(rename = "Gym Workout")]
    GymWorkout,
}

impl ActivityType {
    /// Every member, in declaration order.
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Running,
        ActivityType::Cycling,
        ActivityType::Walking,
        ActivityType::GymWorkout,
    ];

    /// Display name, identical to the stored and serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Walking => "Walking",
            ActivityType::GymWorkout => "Gym Workout",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known activity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown activity type: {0}")]
pub struct UnknownActivityType(pub String);

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}

/// A workout as seen by API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    /// Store-assigned document ID
    pub id: String,
    /// Owner
    pub user_id: String,
    pub activity_type: ActivityType,
    /// Duration in minutes
    pub duration: f64,
    /// Distance in kilometers (absent for non-distance activities)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub calories: f64,
    /// When the activity took place
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied workout fields for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutForm {
    pub activity_type: ActivityType,
    #[validate(range(exclusive_min = 0.0, message = "duration must be positive"))]
    pub duration: f64,
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    #[serde(default)]
    pub distance: Option<f64>,
    #[validate(range(min = 0.0, message = "calories must not be negative"))]
    pub calories: f64,
    /// RFC3339 timestamp or `YYYY-MM-DD`
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    #[serde(default)]
    pub notes: Option<String>,
}

/// Sparse filter over a user's workouts. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutFilterSpec {
    pub activity_type: Option<ActivityType>,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
