// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout repository.
//!
//! Owns bookkeeping timestamps and owner scoping on top of a document store:
//! - `create` stamps `createdAt == updatedAt == now`
//! - `update` is a full replace that keeps `createdAt` and advances `updatedAt`
//! - `delete` is idempotent
//! - reads default missing timestamps to the time of the read

use crate::db::{WorkoutRecord, WorkoutStore};
use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutFilterSpec, WorkoutForm};
use crate::services::filter::build_predicates;
use crate::time_utils::{format_utc_rfc3339, parse_date_input};
use chrono::{DateTime, Duration, Utc};

/// Typed workout persistence over any `WorkoutStore`.
#[derive(Clone)]
pub struct WorkoutRepository<S> {
    store: S,
}

impl<S: WorkoutStore> WorkoutRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a new workout for `owner_id` and return its id.
    pub async fn create(&self, owner_id: &str, form: &WorkoutForm) -> Result<String> {
        let date = parse_date_input(&form.date)?;
        let now = Utc::now();

        let record = build_record(owner_id, form, date, now, now);
        let id = self.store.insert(&record).await?;

        tracing::info!(
            user_id = owner_id,
            workout_id = %id,
            activity_type = %form.activity_type,
            "Workout created"
        );

        Ok(id)
    }

    /// Fetch one of `owner_id`'s workouts.
    pub async fn get(&self, owner_id: &str, id: &str) -> Result<Option<Workout>> {
        let now = Utc::now();
        Ok(self
            .owned_record(owner_id, id)
            .await?
            .map(|record| record.into_workout(now)))
    }

    /// Replace every caller-owned field of a workout.
    ///
    /// Fails with `NotFound` if the id does not exist or belongs to someone
    /// else; the two cases are indistinguishable to the caller.
    pub async fn update(&self, owner_id: &str, id: &str, form: &WorkoutForm) -> Result<()> {
        let date = parse_date_input(&form.date)?;

        let existing = self
            .owned_record(owner_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;

        let previous = existing.updated_at.or(existing.created_at);
        let updated_at = next_update_stamp(previous, Utc::now());
        // Legacy records without createdAt get one pinned now, never after updatedAt
        let created_at = existing.created_at.or(previous).unwrap_or(updated_at);

        let record = build_record(owner_id, form, date, created_at, updated_at);
        self.store.replace(id, &record).await?;

        tracing::info!(
            user_id = owner_id,
            workout_id = id,
            updated_at = %format_utc_rfc3339(updated_at),
            "Workout updated"
        );

        Ok(())
    }

    /// Delete a workout. Deleting a missing id succeeds.
    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        match self.store.get(id).await? {
            Some(record) if record.user_id == owner_id => {
                self.store.remove(id).await?;
                tracing::info!(user_id = owner_id, workout_id = id, "Workout deleted");
            }
            Some(_) => {
                tracing::warn!(
                    user_id = owner_id,
                    workout_id = id,
                    "Ignoring delete of workout owned by another user"
                );
            }
            None => {
                tracing::debug!(
                    user_id = owner_id,
                    workout_id = id,
                    "Workout already absent (idempotent delete)"
                );
            }
        }

        Ok(())
    }

    /// Query `owner_id`'s workouts, most recent first.
    pub async fn query(&self, owner_id: &str, spec: &WorkoutFilterSpec) -> Result<Vec<Workout>> {
        let predicates = build_predicates(owner_id, spec);

        tracing::debug!(
            user_id = owner_id,
            filter = ?spec,
            predicates = predicates.len(),
            "Querying workouts"
        );

        let records = self.store.query(&predicates).await?;
        let now = Utc::now();

        Ok(records
            .into_iter()
            .map(|record| record.into_workout(now))
            .collect())
    }

    async fn owned_record(&self, owner_id: &str, id: &str) -> Result<Option<WorkoutRecord>> {
        Ok(self
            .store
            .get(id)
            .await?
            .filter(|record| record.user_id == owner_id))
    }
}

fn build_record(
    owner_id: &str,
    form: &WorkoutForm,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> WorkoutRecord {
    WorkoutRecord {
        id: None,
        user_id: owner_id.to_string(),
        activity_type: form.activity_type,
        duration: form.duration,
        distance: form.distance,
        calories: form.calories,
        date: Some(date),
        notes: form.notes.clone(),
        created_at: Some(created_at),
        updated_at: Some(updated_at),
    }
}

/// Next `updatedAt` for a record last stamped at `previous`.
///
/// Strictly greater than `previous` even when the clock has not moved past it
/// (coarse clocks, skew between writers). Firestore keeps microseconds.
fn next_update_stamp(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}
