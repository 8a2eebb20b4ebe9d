// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prediction gateway tests against a local stand-in inference endpoint.
//!
//! Each test serves a small axum app on an ephemeral port and points the
//! gateway at it, so every failure mode can be produced deterministically.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use workout_tracker::models::{ActivityType, PredictionInput};
use workout_tracker::services::PredictionGateway;

mod common;

const TIMEOUT: Duration = Duration::from_millis(300);

fn input(duration: f64, distance: Option<f64>, calories: f64) -> PredictionInput {
    PredictionInput {
        duration,
        distance,
        calories,
    }
}

async fn gateway_for(router: Router) -> PredictionGateway {
    let base = common::spawn_server(router).await;
    PredictionGateway::new(format!("{}/api/predict", base), TIMEOUT).unwrap()
}

#[tokio::test]
async fn test_remote_result_returned_verbatim() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { Json(json!({"predictedActivity": "Walking", "confidence": 0.61})) }),
    );
    let gateway = gateway_for(router).await;

    // The rules would say Cycling here; the remote answer must win
    let result = gateway.predict(&input(30.0, Some(10.0), 300.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::Walking);
    assert_eq!(result.confidence, Some(0.61));
}

#[tokio::test]
async fn test_remote_result_without_confidence() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { Json(json!({"predictedActivity": "Gym Workout"})) }),
    );
    let gateway = gateway_for(router).await;

    let result = gateway.predict(&input(30.0, Some(10.0), 300.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::GymWorkout);
    assert_eq!(result.confidence, None);
}

#[tokio::test]
async fn test_request_body_sends_zero_distance_when_absent() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let router = Router::new().route(
        "/api/predict",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({"predictedActivity": "Gym Workout", "confidence": 0.9}))
            }
        }),
    );
    let gateway = gateway_for(router).await;

    gateway.predict(&input(45.0, None, 320.0)).await;

    let body = captured.lock().unwrap().clone().expect("stub saw no request");
    assert_eq!(
        body,
        json!({"duration": 45.0, "distance": 0.0, "calories": 320.0})
    );
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
    );
    let gateway = gateway_for(router).await;

    let result = gateway.predict(&input(30.0, Some(10.0), 300.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::Cycling);
    assert_eq!(result.confidence, Some(0.85));
}

#[tokio::test]
async fn test_unparseable_body_falls_back() {
    let router = Router::new().route("/api/predict", post(|| async { "definitely not json" }));
    let gateway = gateway_for(router).await;

    let result = gateway.predict(&input(30.0, Some(6.0), 250.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::Running);
    assert_eq!(result.confidence, Some(0.8));
}

#[tokio::test]
async fn test_unknown_activity_falls_back() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { Json(json!({"predictedActivity": "Swimming", "confidence": 0.99})) }),
    );
    let gateway = gateway_for(router).await;

    let result = gateway.predict(&input(60.0, Some(8.0), 400.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::Walking);
    assert_eq!(result.confidence, Some(0.75));
}

#[tokio::test]
async fn test_slow_endpoint_times_out_and_falls_back() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"predictedActivity": "Running", "confidence": 1.0}))
        }),
    );
    let gateway = gateway_for(router).await;

    let started = Instant::now();
    let result = gateway.predict(&input(60.0, Some(0.0), 400.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::GymWorkout);
    assert_eq!(result.confidence, Some(0.8));
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "fallback should not wait for the slow endpoint"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back() {
    // Bind then drop to get a port nobody is listening on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway =
        PredictionGateway::new(format!("http://{}/api/predict", addr), TIMEOUT).unwrap();

    let result = gateway.predict(&input(30.0, Some(10.0), 300.0)).await;

    assert_eq!(result.predicted_activity, ActivityType::Cycling);
    assert_eq!(result.confidence, Some(0.85));
}
