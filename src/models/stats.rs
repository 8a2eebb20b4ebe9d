//! Workout summary statistics for the dashboard.
//!
//! Summaries are never stored; they are recomputed from the current query
//! result every time the dashboard asks for them.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{ActivityType, Workout};

/// Number of workouts kept in `recent_workouts`.
pub const RECENT_WORKOUTS: usize = 5;

/// Aggregate statistics over a collection of workouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsSummary {
    pub total_workouts: usize,
    pub total_calories: f64,
    /// Minutes
    pub total_duration: f64,
    /// Kilometers; workouts without a distance contribute nothing
    pub total_distance: f64,
    /// Count per activity type. Always holds every `ActivityType`.
    pub workouts_by_type: BTreeMap<ActivityType, usize>,
    /// Leading workouts of the input, in input order
    pub recent_workouts: Vec<Workout>,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            total_workouts: 0,
            total_calories: 0.0,
            total_duration: 0.0,
            total_distance: 0.0,
            workouts_by_type: ActivityType::ALL.into_iter().map(|t| (t, 0)).collect(),
            recent_workouts: Vec::new(),
        }
    }
}

impl StatsSummary {
    /// Reduce a workout collection into summary statistics.
    ///
    /// The input must already be sorted most-recent-first; `recent_workouts`
    /// takes its leading elements without re-sorting.
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        let mut stats = Self {
            total_workouts: workouts.len(),
            ..Self::default()
        };

        for workout in workouts {
            stats.total_calories += workout.calories;
            stats.total_duration += workout.duration;
            stats.total_distance += workout.distance.unwrap_or(0.0);
            *stats
                .workouts_by_type
                .entry(workout.activity_type)
                .or_insert(0) += 1;
        }

        stats.recent_workouts = workouts.iter().take(RECENT_WORKOUTS).cloned().collect();
        stats
    }
}

/// Workout count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyCount {
    /// "YYYY-MM-DD"
    pub date: String,
    pub count: usize,
}

/// Count workouts per UTC calendar day for the `days` days ending at `today`.
///
/// Buckets are returned oldest first. Workouts outside the window are ignored.
pub fn daily_trend(workouts: &[Workout], today: NaiveDate, days: u32) -> Vec<DailyCount> {
    let window: Vec<NaiveDate> = (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .collect();

    let mut counts: BTreeMap<NaiveDate, usize> = window.iter().map(|d| (*d, 0)).collect();
    for workout in workouts {
        if let Some(count) = counts.get_mut(&workout.date.date_naive()) {
            *count += 1;
        }
    }

    counts
        .into_iter()
        .map(|(date, count)| DailyCount {
            date: date.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_workout(
        id: u32,
        activity_type: ActivityType,
        day: u32,
        duration: f64,
        distance: Option<f64>,
        calories: f64,
    ) -> Workout {
        let date = Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap();
        Workout {
            id: format!("w{}", id),
            user_id: "user-1".to_string(),
            activity_type,
            duration,
            distance,
            calories,
            date,
            notes: None,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn test_empty_input_yields_zeroes() {
        let stats = StatsSummary::from_workouts(&[]);

        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.total_calories, 0.0);
        assert_eq!(stats.total_duration, 0.0);
        assert_eq!(stats.total_distance, 0.0);
        assert!(stats.recent_workouts.is_empty());
        assert_eq!(stats.workouts_by_type.len(), 4);
        assert!(stats.workouts_by_type.values().all(|&c| c == 0));
    }

    #[test]
    fn test_totals_and_type_counts() {
        let workouts = vec![
            make_workout(1, ActivityType::Running, 20, 30.0, Some(6.0), 300.0),
            make_workout(2, ActivityType::GymWorkout, 19, 60.0, None, 400.0),
            make_workout(3, ActivityType::Running, 18, 45.0, Some(9.5), 450.0),
        ];

        let stats = StatsSummary::from_workouts(&workouts);

        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.total_calories, 1150.0);
        assert_eq!(stats.total_duration, 135.0);
        // The gym session has no distance and must not skew the sum
        assert_eq!(stats.total_distance, 15.5);
        assert_eq!(stats.workouts_by_type[&ActivityType::Running], 2);
        assert_eq!(stats.workouts_by_type[&ActivityType::GymWorkout], 1);
        assert_eq!(stats.workouts_by_type[&ActivityType::Cycling], 0);
        assert_eq!(stats.workouts_by_type[&ActivityType::Walking], 0);
    }

    #[test]
    fn test_type_counts_sum_to_total() {
        let workouts: Vec<Workout> = (1..=9)
            .map(|i| {
                let t = ActivityType::ALL[(i as usize) % 4];
                make_workout(i, t, i, 20.0, Some(2.0), 100.0)
            })
            .collect();

        let stats = StatsSummary::from_workouts(&workouts);
        let sum: usize = stats.workouts_by_type.values().sum();
        assert_eq!(sum, stats.total_workouts);
    }

    #[test]
    fn test_recent_workouts_preserve_input_order() {
        // Deliberately not date-sorted: the aggregator must not reorder
        let workouts: Vec<Workout> = [3, 9, 1, 7, 5, 2, 8]
            .iter()
            .map(|&day| make_workout(day, ActivityType::Walking, day, 30.0, Some(3.0), 120.0))
            .collect();

        let stats = StatsSummary::from_workouts(&workouts);
        let ids: Vec<&str> = stats.recent_workouts.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w3", "w9", "w1", "w7", "w5"]);
    }

    #[test]
    fn test_recent_workouts_shorter_than_limit() {
        let workouts = vec![
            make_workout(1, ActivityType::Cycling, 2, 90.0, Some(40.0), 900.0),
            make_workout(2, ActivityType::Cycling, 1, 60.0, Some(25.0), 600.0),
        ];

        let stats = StatsSummary::from_workouts(&workouts);
        assert_eq!(stats.recent_workouts.len(), 2);
    }

    #[test]
    fn test_serialized_keys_use_display_names() {
        let stats = StatsSummary::default();
        let json = serde_json::to_value(&stats).unwrap();
        let by_type = json["workoutsByType"].as_object().unwrap();

        assert_eq!(by_type.len(), 4);
        assert!(by_type.contains_key("Gym Workout"));
        assert!(by_type.contains_key("Running"));
    }

    #[test]
    fn test_daily_trend_window() {
        let workouts = vec![
            make_workout(1, ActivityType::Running, 15, 30.0, Some(5.0), 300.0),
            make_workout(2, ActivityType::Walking, 15, 40.0, Some(3.0), 150.0),
            make_workout(3, ActivityType::Cycling, 12, 60.0, Some(25.0), 500.0),
            // Outside the window
            make_workout(4, ActivityType::Cycling, 2, 60.0, Some(25.0), 500.0),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let trend = daily_trend(&workouts, today, 7);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, "2024-01-09");
        assert_eq!(trend[6].date, "2024-01-15");
        assert_eq!(trend[6].count, 2);
        assert_eq!(trend[3].date, "2024-01-12");
        assert_eq!(trend[3].count, 1);
        let total: usize = trend.iter().map(|d| d.count).sum();
        assert_eq!(total, 3);
    }
}
