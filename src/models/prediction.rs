// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity prediction request/response model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::ActivityType;

/// Physiological inputs used to guess an activity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PredictionInput {
    /// Minutes
    #[validate(range(min = 0.0, message = "duration must not be negative"))]
    pub duration: f64,
    /// Kilometers
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    #[serde(default)]
    pub distance: Option<f64>,
    #[validate(range(min = 0.0, message = "calories must not be negative"))]
    pub calories: f64,
}

/// Predicted activity with an optional confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PredictionResult {
    pub predicted_activity: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}
