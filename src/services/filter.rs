// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Translate a sparse workout filter into an ordered predicate list.
//!
//! The produced list always has the same shape:
//! 1. owner equality (always present, always first)
//! 2. one predicate per present filter field, in a fixed order
//! 3. date-descending sort (always present, always last)
//!
//! No cross-field validation happens here; an inverted duration range just
//! matches nothing.

use crate::db::{Direction, Field, Predicate};
use crate::models::WorkoutFilterSpec;
use std::iter;

/// Build the predicates for an owner-scoped workout query.
pub fn build_predicates(owner_id: &str, spec: &WorkoutFilterSpec) -> Vec<Predicate> {
    let optional = [
        spec.activity_type
            .map(|t| Predicate::eq(Field::ActivityType, t.as_str())),
        spec.min_duration.map(|d| Predicate::gte(Field::Duration, d)),
        spec.max_duration.map(|d| Predicate::lte(Field::Duration, d)),
        spec.start_date.map(|d| Predicate::gte(Field::Date, d)),
        spec.end_date.map(|d| Predicate::lte(Field::Date, d)),
    ];

    iter::once(Predicate::eq(Field::UserId, owner_id))
        .chain(optional.into_iter().flatten())
        .chain(iter::once(Predicate::order_by(
            Field::Date,
            Direction::Descending,
        )))
        .collect()
}
