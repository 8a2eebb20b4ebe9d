// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use workout_tracker::config::Config;
use workout_tracker::db::{FirestoreDb, MemoryStore, Store};
use workout_tracker::middleware::auth::create_jwt;
use workout_tracker::routes::create_router;
use workout_tracker::services::{PredictionGateway, WorkoutRepository};
use workout_tracker::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let prediction_url = config.prediction_url.clone();
    create_test_app_with_predictor(&prediction_url, config.prediction_timeout)
}

/// Create a test app whose prediction gateway targets `prediction_url`.
#[allow(dead_code)]
pub fn create_test_app_with_predictor(
    prediction_url: &str,
    timeout: Duration,
) -> (Router, Arc<AppState>) {
    let config = Config {
        prediction_url: prediction_url.to_string(),
        prediction_timeout: timeout,
        ..Config::test_default()
    };

    let predictor = PredictionGateway::new(prediction_url, timeout)
        .expect("Failed to build prediction gateway");

    let state = Arc::new(AppState {
        config,
        workouts: WorkoutRepository::new(Store::Memory(MemoryStore::new())),
        predictor,
    });

    (create_router(state.clone()), state)
}

/// Create a session token for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Serve `router` on an ephemeral loopback port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{}", addr)
}

/// Parse an RFC3339 timestamp in tests.
#[allow(dead_code)]
pub fn parse_time(value: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(value)
        .expect("valid RFC3339 timestamp")
        .with_timezone(&chrono::Utc)
}
