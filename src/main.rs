// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Stores workouts per user, serves dashboard statistics, and predicts
//! activity types through a remote model with a local fallback.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::Store,
    services::{PredictionGateway, WorkoutRepository},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        store = ?config.store_backend,
        "Starting Workout Tracker API"
    );

    // Connect the document store
    let store = Store::connect(&config).await?;

    // Remote model client; falls back locally on any failure
    let predictor = PredictionGateway::new(&config.prediction_url, config.prediction_timeout)?;
    tracing::info!(
        endpoint = %config.prediction_url,
        timeout_ms = config.prediction_timeout.as_millis() as u64,
        "Prediction gateway initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        workouts: WorkoutRepository::new(store),
        predictor,
    });

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}
