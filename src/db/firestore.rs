// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing the workout store.
//!
//! Workouts live in a single top-level `workouts` collection; every
//! document carries its owner's `userId` and queries filter on it.

use crate::db::{collections, Direction, FieldValue, Predicate, WorkoutRecord, WorkoutStore};
use crate::error::AppError;
use firestore::select_filter_builder::FirestoreQueryFilterBuilder;
use firestore::{FirestoreQueryDirection, FirestoreQueryFilter, FirestoreTimestamp, FirestoreValue};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator rejects nothing, so skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::database("connect", e))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| AppError::database("connect emulator", e))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self, op: &'static str) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::database(op, "not connected (offline mode)"))
    }
}

fn to_firestore_value(value: &FieldValue) -> FirestoreValue {
    match value {
        FieldValue::Text(s) => s.clone().into(),
        FieldValue::Number(n) => (*n).into(),
        FieldValue::Timestamp(t) => FirestoreTimestamp(*t).into(),
    }
}

fn to_firestore_filter(
    q: &FirestoreQueryFilterBuilder,
    predicate: &Predicate,
) -> Option<FirestoreQueryFilter> {
    match predicate {
        Predicate::Eq(field, value) => q.field(field.as_str()).eq(to_firestore_value(value)),
        Predicate::Gte(field, value) => q
            .field(field.as_str())
            .greater_than_or_equal(to_firestore_value(value)),
        Predicate::Lte(field, value) => q
            .field(field.as_str())
            .less_than_or_equal(to_firestore_value(value)),
        Predicate::OrderBy(..) => None,
    }
}

impl WorkoutStore for FirestoreDb {
    async fn insert(&self, record: &WorkoutRecord) -> Result<String, AppError> {
        let created: WorkoutRecord = self
            .get_client("insert")?
            .fluent()
            .insert()
            .into(collections::WORKOUTS)
            .generate_document_id()
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::database("insert", e))?;

        created
            .id
            .ok_or_else(|| AppError::database("insert", "Firestore returned no document id"))
    }

    async fn get(&self, id: &str) -> Result<Option<WorkoutRecord>, AppError> {
        self.get_client("get")?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::database("get", e))
    }

    async fn replace(&self, id: &str, record: &WorkoutRecord) -> Result<(), AppError> {
        // No field mask: the whole document is overwritten
        let _: () = self
            .get_client("replace")?
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(id)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::database("replace", e))?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.get_client("remove")?
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::database("remove", e))?;
        Ok(())
    }

    async fn query(&self, predicates: &[Predicate]) -> Result<Vec<WorkoutRecord>, AppError> {
        let filters: Vec<Predicate> = predicates
            .iter()
            .filter(|p| !p.is_ordering())
            .cloned()
            .collect();

        let ordering: Vec<(&'static str, FirestoreQueryDirection)> = predicates
            .iter()
            .filter_map(|p| match p {
                Predicate::OrderBy(field, Direction::Ascending) => {
                    Some((field.as_str(), FirestoreQueryDirection::Ascending))
                }
                Predicate::OrderBy(field, Direction::Descending) => {
                    Some((field.as_str(), FirestoreQueryDirection::Descending))
                }
                _ => None,
            })
            .collect();

        self.get_client("query")?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| q.for_all(filters.iter().map(|p| to_firestore_filter(&q, p))))
            .order_by(ordering)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::database("query", e))
    }
}
