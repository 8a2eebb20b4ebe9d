// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for local development and tests.

use crate::db::query::sort_records;
use crate::db::{Predicate, WorkoutRecord, WorkoutStore};
use crate::error::AppError;
use dashmap::DashMap;
use std::sync::Arc;

/// Workout store backed by a concurrent in-memory map.
///
/// Clones share the same underlying data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<String, WorkoutRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under a caller-chosen id, bypassing the repository.
    ///
    /// Useful for seeding documents that the repository would never write,
    /// e.g. legacy records without timestamps.
    pub fn put_raw(&self, id: &str, record: WorkoutRecord) {
        self.records.insert(id.to_string(), record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn with_id(id: &str, record: &WorkoutRecord) -> WorkoutRecord {
    WorkoutRecord {
        id: Some(id.to_string()),
        ..record.clone()
    }
}

impl WorkoutStore for MemoryStore {
    async fn insert(&self, record: &WorkoutRecord) -> Result<String, AppError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.records.insert(id.clone(), with_id(&id, record));
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<WorkoutRecord>, AppError> {
        Ok(self.records.get(id).map(|r| with_id(id, r.value())))
    }

    async fn replace(&self, id: &str, record: &WorkoutRecord) -> Result<(), AppError> {
        self.records.insert(id.to_string(), with_id(id, record));
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.records.remove(id);
        Ok(())
    }

    async fn query(&self, predicates: &[Predicate]) -> Result<Vec<WorkoutRecord>, AppError> {
        let mut matched: Vec<WorkoutRecord> = self
            .records
            .iter()
            .filter(|entry| predicates.iter().all(|p| p.matches(entry.value())))
            .map(|entry| with_id(entry.key(), entry.value()))
            .collect();

        sort_records(&mut matched, predicates);
        Ok(matched)
    }
}
