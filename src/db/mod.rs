// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (document store).
//!
//! The repository only needs a small capability surface from the store:
//! create/replace/delete by id and a predicate query. Firestore provides it
//! in production; the in-memory store provides it for local runs and tests.

pub mod firestore;
pub mod memory;
pub mod query;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryStore;
pub use query::{Direction, Field, FieldValue, Predicate};

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::{ActivityType, Workout};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Collection names as constants.
pub mod collections {
    pub const WORKOUTS: &str = "workouts";
}

/// A workout document as persisted.
///
/// Timestamps are optional so that older or hand-edited documents still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Document ID, populated on read (never written as a field)
    #[serde(rename = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub duration: f64,
    #[serde(default)]
    pub distance: Option<f64>,
    pub calories: f64,
    #[serde(default, with = "::firestore::serialize_as_optional_timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "::firestore::serialize_as_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "::firestore::serialize_as_optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkoutRecord {
    /// Materialize the record, substituting `now` for missing timestamps.
    pub fn into_workout(self, now: DateTime<Utc>) -> Workout {
        Workout {
            id: self.id.unwrap_or_default(),
            user_id: self.user_id,
            activity_type: self.activity_type,
            duration: self.duration,
            distance: self.distance,
            calories: self.calories,
            date: self.date.unwrap_or(now),
            notes: self.notes,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

/// Capability surface the workout repository needs from a document store.
///
/// All failures surface as `AppError::Database`.
pub trait WorkoutStore: Send + Sync {
    /// Persist a new record and return its store-assigned id.
    fn insert(
        &self,
        record: &WorkoutRecord,
    ) -> impl Future<Output = Result<String, AppError>> + Send;

    /// Fetch one record by id.
    fn get(&self, id: &str)
        -> impl Future<Output = Result<Option<WorkoutRecord>, AppError>> + Send;

    /// Overwrite every field of the record stored under `id`.
    fn replace(
        &self,
        id: &str,
        record: &WorkoutRecord,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Remove the record under `id`. Removing a missing id is not an error.
    fn remove(&self, id: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Run an ordered predicate list against the collection.
    fn query(
        &self,
        predicates: &[Predicate],
    ) -> impl Future<Output = Result<Vec<WorkoutRecord>, AppError>> + Send;
}

/// Store selected at startup.
#[derive(Clone)]
pub enum Store {
    Firestore(FirestoreDb),
    Memory(MemoryStore),
}

impl Store {
    /// Connect to the backend named in the configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Firestore => Ok(Store::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory workout store; data will not survive restarts");
                Ok(Store::Memory(MemoryStore::new()))
            }
        }
    }
}

impl WorkoutStore for Store {
    async fn insert(&self, record: &WorkoutRecord) -> Result<String, AppError> {
        match self {
            Store::Firestore(db) => db.insert(record).await,
            Store::Memory(db) => db.insert(record).await,
        }
    }

    async fn get(&self, id: &str) -> Result<Option<WorkoutRecord>, AppError> {
        match self {
            Store::Firestore(db) => db.get(id).await,
            Store::Memory(db) => db.get(id).await,
        }
    }

    async fn replace(&self, id: &str, record: &WorkoutRecord) -> Result<(), AppError> {
        match self {
            Store::Firestore(db) => db.replace(id, record).await,
            Store::Memory(db) => db.replace(id, record).await,
        }
    }

    async fn remove(&self, id: &str) -> Result<(), AppError> {
        match self {
            Store::Firestore(db) => db.remove(id).await,
            Store::Memory(db) => db.remove(id).await,
        }
    }

    async fn query(&self, predicates: &[Predicate]) -> Result<Vec<WorkoutRecord>, AppError> {
        match self {
            Store::Firestore(db) => db.query(predicates).await,
            Store::Memory(db) => db.query(predicates).await,
        }
    }
}
