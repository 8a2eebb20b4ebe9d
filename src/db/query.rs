// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store-agnostic query predicates over the workouts collection.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::db::WorkoutRecord;

/// Queryable workout fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserId,
    ActivityType,
    Duration,
    Date,
}

impl Field {
    /// Stored document field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::UserId => "userId",
            Field::ActivityType => "activityType",
            Field::Duration => "duration",
            Field::Date => "date",
        }
    }

    /// Extract this field's comparable value from a raw record.
    pub fn value_of(self, record: &WorkoutRecord) -> Option<FieldValue> {
        match self {
            Field::UserId => Some(FieldValue::Text(record.user_id.clone())),
            Field::ActivityType => Some(FieldValue::Text(record.activity_type.as_str().to_string())),
            Field::Duration => Some(FieldValue::Number(record.duration)),
            Field::Date => record.date.map(FieldValue::Timestamp),
        }
    }
}

/// A typed value a predicate compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Compare two values of the same kind. Mixed kinds are incomparable.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// Sort direction for `Predicate::OrderBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A single field-level query constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Field, FieldValue),
    Gte(Field, FieldValue),
    Lte(Field, FieldValue),
    OrderBy(Field, Direction),
}

impl Predicate {
    pub fn eq(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::Eq(field, value.into())
    }

    pub fn gte(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::Gte(field, value.into())
    }

    pub fn lte(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::Lte(field, value.into())
    }

    pub fn order_by(field: Field, direction: Direction) -> Self {
        Predicate::OrderBy(field, direction)
    }

    pub fn field(&self) -> Field {
        match self {
            Predicate::Eq(f, _)
            | Predicate::Gte(f, _)
            | Predicate::Lte(f, _)
            | Predicate::OrderBy(f, _) => *f,
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, Predicate::OrderBy(..))
    }

    /// Whether `record` satisfies this predicate.
    ///
    /// Ordering predicates match everything. A record missing the field
    /// never satisfies a comparison.
    pub fn matches(&self, record: &WorkoutRecord) -> bool {
        let compare = |field: &Field, expected: &FieldValue| {
            field
                .value_of(record)
                .and_then(|actual| actual.compare(expected))
        };

        match self {
            Predicate::OrderBy(..) => true,
            Predicate::Eq(f, v) => compare(f, v).is_some_and(Ordering::is_eq),
            Predicate::Gte(f, v) => compare(f, v).is_some_and(Ordering::is_ge),
            Predicate::Lte(f, v) => compare(f, v).is_some_and(Ordering::is_le),
        }
    }
}

/// Sort records in place by every `OrderBy` predicate, in order.
///
/// Records missing a sort field are kept and order before all others.
/// Firestore instead leaves such documents out of an ordered query, so a
/// record with no `date` is only listed by the memory store.
pub fn sort_records(records: &mut [WorkoutRecord], predicates: &[Predicate]) {
    let orderings: Vec<(Field, Direction)> = predicates
        .iter()
        .filter_map(|p| match p {
            Predicate::OrderBy(f, d) => Some((*f, *d)),
            _ => None,
        })
        .collect();

    if orderings.is_empty() {
        return;
    }

    records.sort_by(|a, b| {
        orderings
            .iter()
            .map(|(field, direction)| {
                let ordering = match (field.value_of(a), field.value_of(b)) {
                    (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use chrono::TimeZone;

    fn record(user: &str, duration: f64, day: Option<u32>) -> WorkoutRecord {
        WorkoutRecord {
            id: None,
            user_id: user.to_string(),
            activity_type: ActivityType::Running,
            duration,
            distance: Some(5.0),
            calories: 300.0,
            date: day.map(|d| Utc.with_ymd_and_hms(2024, 3, d, 8, 0, 0).unwrap()),
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_equality_and_range_matching() {
        let r = record("alice", 30.0, Some(10));

        assert!(Predicate::eq(Field::UserId, "alice").matches(&r));
        assert!(!Predicate::eq(Field::UserId, "bob").matches(&r));
        assert!(Predicate::eq(Field::ActivityType, "Running").matches(&r));
        assert!(Predicate::gte(Field::Duration, 30.0).matches(&r));
        assert!(!Predicate::gte(Field::Duration, 30.5).matches(&r));
        assert!(Predicate::lte(Field::Duration, 30.0).matches(&r));
        assert!(!Predicate::lte(Field::Duration, 29.0).matches(&r));
    }

    #[test]
    fn test_missing_field_never_matches_comparison() {
        let r = record("alice", 30.0, None);
        let bound = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

        assert!(!Predicate::gte(Field::Date, bound).matches(&r));
        assert!(Predicate::order_by(Field::Date, Direction::Descending).matches(&r));
    }

    #[test]
    fn test_mixed_kinds_do_not_match() {
        let r = record("alice", 30.0, Some(1));
        assert!(!Predicate::eq(Field::Duration, "30").matches(&r));
    }

    #[test]
    fn test_sort_descending_by_date() {
        let mut records = vec![
            record("a", 1.0, Some(5)),
            record("a", 2.0, None),
            record("a", 3.0, Some(20)),
            record("a", 4.0, Some(12)),
        ];

        sort_records(
            &mut records,
            &[Predicate::order_by(Field::Date, Direction::Descending)],
        );

        // Undated record is kept and lands last
        let durations: Vec<f64> = records.iter().map(|r| r.duration).collect();
        assert_eq!(durations, vec![3.0, 4.0, 1.0, 2.0]);
    }
}
