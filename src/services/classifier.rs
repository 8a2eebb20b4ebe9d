// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule-based activity classifier.
//!
//! Used whenever the remote inference endpoint cannot answer. Classification
//! is purely speed based: no distance means a gym session, otherwise the
//! average speed picks cycling, running or walking.

use crate::models::{ActivityType, PredictionResult};

/// Above this average speed (km/h) a workout is cycling.
const CYCLING_MIN_SPEED_KMH: f64 = 15.0;
/// Above this average speed (km/h) a workout is running.
const RUNNING_MIN_SPEED_KMH: f64 = 8.0;

const GYM_CONFIDENCE: f64 = 0.8;
const CYCLING_CONFIDENCE: f64 = 0.85;
const RUNNING_CONFIDENCE: f64 = 0.8;
const WALKING_CONFIDENCE: f64 = 0.75;

/// Classify a workout from duration (minutes) and distance (km).
///
/// Calories are accepted for parity with the remote model but do not
/// influence the rules. Never produces a non-finite intermediate: a
/// non-positive duration or distance is classified as a gym workout.
pub fn classify(duration: f64, distance: Option<f64>, _calories: f64) -> (ActivityType, f64) {
    let Some(distance) = distance.filter(|d| *d > 0.0) else {
        return (ActivityType::GymWorkout, GYM_CONFIDENCE);
    };

    if duration <= 0.0 {
        return (ActivityType::GymWorkout, GYM_CONFIDENCE);
    }

    let speed_kmh = distance / (duration / 60.0);
    if !speed_kmh.is_finite() {
        return (ActivityType::GymWorkout, GYM_CONFIDENCE);
    }

    if speed_kmh > CYCLING_MIN_SPEED_KMH {
        (ActivityType::Cycling, CYCLING_CONFIDENCE)
    } else if speed_kmh > RUNNING_MIN_SPEED_KMH {
        (ActivityType::Running, RUNNING_CONFIDENCE)
    } else {
        (ActivityType::Walking, WALKING_CONFIDENCE)
    }
}

/// `classify` packaged as a prediction result.
pub fn fallback_prediction(duration: f64, distance: Option<f64>, calories: f64) -> PredictionResult {
    let (predicted_activity, confidence) = classify(duration, distance, calories);
    PredictionResult {
        predicted_activity,
        confidence: Some(confidence),
    }
}
