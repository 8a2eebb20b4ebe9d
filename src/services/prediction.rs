// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity prediction with degraded-mode fallback.
//!
//! One POST to the inference endpoint per prediction. Anything short of a
//! well-formed success (transport error, timeout, non-2xx, bad body) drops to
//! the local rule-based classifier. Remote calls are never retried.

use crate::models::workout::UnknownActivityType;
use crate::models::{ActivityType, PredictionInput, PredictionResult};
use crate::services::classifier::fallback_prediction;
use anyhow::Context;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why the remote endpoint's answer could not be used.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference endpoint returned HTTP {0}")]
    Status(StatusCode),

    #[error("invalid inference response: {0}")]
    InvalidResponse(String),
}

#[derive(Serialize)]
struct RemoteRequest {
    duration: f64,
    distance: f64,
    calories: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteResponse {
    predicted_activity: String,
    #[serde(default)]
    confidence: Option<f64>,
}

impl RemoteResponse {
    fn into_result(self) -> Result<PredictionResult, PredictionError> {
        let predicted_activity: ActivityType = self
            .predicted_activity
            .parse()
            .map_err(|e: UnknownActivityType| PredictionError::InvalidResponse(e.to_string()))?;

        if let Some(c) = self.confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(PredictionError::InvalidResponse(format!(
                    "confidence {} outside [0, 1]",
                    c
                )));
            }
        }

        Ok(PredictionResult {
            predicted_activity,
            confidence: self.confidence,
        })
    }
}

/// Predicts activity types, preferring the remote model.
#[derive(Clone)]
pub struct PredictionGateway {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionGateway {
    /// Create a gateway whose remote calls give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building inference HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Predict the activity for `input`. Always produces a result.
    pub async fn predict(&self, input: &PredictionInput) -> PredictionResult {
        match self.request_remote(input).await {
            Ok(result) => {
                tracing::debug!(
                    predicted = %result.predicted_activity,
                    confidence = ?result.confidence,
                    "Remote prediction"
                );
                result
            }
            Err(e) => {
                let result = fallback_prediction(input.duration, input.distance, input.calories);
                tracing::warn!(
                    error = %e,
                    endpoint = %self.endpoint,
                    predicted = %result.predicted_activity,
                    "Inference endpoint unavailable, using rule-based prediction"
                );
                result
            }
        }
    }

    async fn request_remote(
        &self,
        input: &PredictionInput,
    ) -> Result<PredictionResult, PredictionError> {
        let body = RemoteRequest {
            duration: input.duration,
            distance: input.distance.unwrap_or(0.0),
            calories: input.calories,
        };

        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status(status));
        }

        let bytes = response.bytes().await?;
        let parsed: RemoteResponse = serde_json::from_slice(&bytes)
            .map_err(|e| PredictionError::InvalidResponse(e.to_string()))?;

        parsed.into_result()
    }
}
