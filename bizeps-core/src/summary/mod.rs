//! Pure aggregation over already-fetched rows. Nothing here touches
//! storage; the session layer fetches and hands the rows in.

mod history;

pub use history::{
    ExerciseHistory, MISSING_EXERCISE_NAME, NO_DATA_NOTICE, SetEntry, group_by_exercise,
    render_history,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::db::models::{ExerciseRecord, WorkoutSession};

/// Totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Σ sets × reps over the day's records.
    pub total_volume: i64,
    pub total_sets: i64,
    /// Number of distinct exercises that appear in the records.
    pub exercise_count: usize,
    /// Number of sessions started that day, regardless of record count.
    pub workout_count: usize,
    /// Σ closed-session minutes; open sessions contribute 0.
    pub total_duration_minutes: i64,
}

/// Fold a day's records and sessions into totals.
///
/// Volume is sets × reps per record, not a plain rep sum: a row with
/// sets > 1 stands for that many performed sets. Values are taken as
/// stored; zero or negative sets/reps flow through the arithmetic
/// unchallenged, since validation belongs to the write path.
pub fn daily_summary(
    date: NaiveDate,
    records: &[ExerciseRecord],
    sessions: &[WorkoutSession],
) -> DailySummary {
    let mut total_volume: i64 = 0;
    let mut total_sets: i64 = 0;
    let mut seen_exercises: HashSet<i64> = HashSet::new();

    for record in records {
        total_volume += record.volume();
        total_sets += record.sets;
        seen_exercises.insert(record.exercise_id);
    }

    DailySummary {
        date,
        total_volume,
        total_sets,
        exercise_count: seen_exercises.len(),
        workout_count: sessions.len(),
        total_duration_minutes: sessions.iter().map(|s| s.duration_minutes).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exercise_id: i64, session_id: i64, sets: i64, reps: i64) -> ExerciseRecord {
        ExerciseRecord {
            id: 0,
            exercise_id,
            session_id,
            sets,
            reps,
            weight: 0.0,
            timestamp: 0,
            notes: None,
        }
    }

    fn session(duration_minutes: i64) -> WorkoutSession {
        WorkoutSession {
            id: 0,
            start_time: 0,
            end_time: None,
            duration_minutes,
            notes: None,
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn empty_day_is_all_zeros_with_date_stamped() {
        let summary = daily_summary(test_date(), &[], &[]);

        assert_eq!(summary.date, test_date());
        assert_eq!(summary.total_volume, 0);
        assert_eq!(summary.total_sets, 0);
        assert_eq!(summary.exercise_count, 0);
        assert_eq!(summary.workout_count, 0);
        assert_eq!(summary.total_duration_minutes, 0);
    }

    #[test]
    fn single_exercise() {
        let records = [record(1, 1, 3, 10)];
        let sessions = [session(0)];

        let summary = daily_summary(test_date(), &records, &sessions);
        assert_eq!(summary.total_volume, 30);
        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.exercise_count, 1);
        assert_eq!(summary.workout_count, 1);
    }

    #[test]
    fn multiple_exercises() {
        let records = [record(1, 1, 3, 10), record(2, 1, 4, 8), record(3, 1, 2, 15)];
        let sessions = [session(0)];

        let summary = daily_summary(test_date(), &records, &sessions);
        assert_eq!(summary.total_volume, 92);
        assert_eq!(summary.total_sets, 9);
        assert_eq!(summary.exercise_count, 3);
        assert_eq!(summary.workout_count, 1);
    }

    #[test]
    fn multiple_sessions_in_one_day() {
        let records = [
            record(1, 1, 3, 10),
            record(2, 1, 2, 12),
            record(1, 2, 2, 8),
            record(3, 2, 3, 5),
        ];
        let sessions = [session(30), session(45)];

        let summary = daily_summary(test_date(), &records, &sessions);
        assert_eq!(summary.total_volume, 85);
        assert_eq!(summary.total_sets, 10);
        assert_eq!(summary.exercise_count, 3);
        assert_eq!(summary.workout_count, 2);
        assert_eq!(summary.total_duration_minutes, 75);
    }

    #[test]
    fn zero_sets_or_reps_contribute_nothing_to_volume() {
        let records = [record(1, 1, 0, 10), record(2, 1, 3, 0), record(3, 1, 4, 5)];

        let summary = daily_summary(test_date(), &records, &[session(0)]);
        assert_eq!(summary.total_volume, 20);
        assert_eq!(summary.total_sets, 7);
        assert_eq!(summary.exercise_count, 3);
    }

    #[test]
    fn negative_values_flow_through_arithmetically() {
        let records = [record(1, 1, -2, 10), record(2, 1, 3, -5), record(3, 1, 2, 8)];

        let summary = daily_summary(test_date(), &records, &[]);
        assert_eq!(summary.total_volume, -19);
        assert_eq!(summary.total_sets, 3);
    }

    #[test]
    fn high_volume_workout() {
        let records = [
            record(1, 1, 10, 20),
            record(2, 1, 8, 25),
            record(3, 1, 6, 30),
        ];

        let summary = daily_summary(test_date(), &records, &[session(0)]);
        assert_eq!(summary.total_volume, 580);
        assert_eq!(summary.total_sets, 24);
        assert_eq!(summary.exercise_count, 3);
    }

    #[test]
    fn large_values_do_not_overflow() {
        let records = [record(1, 1, 1000, 1000), record(2, 1, 500, 2000)];

        let summary = daily_summary(test_date(), &records, &[]);
        assert_eq!(summary.total_volume, 2_000_000);
    }

    #[test]
    fn same_exercise_logged_repeatedly_counts_once() {
        let records = [record(1, 1, 3, 10), record(1, 1, 2, 8), record(1, 1, 1, 5)];

        let summary = daily_summary(test_date(), &records, &[session(0)]);
        assert_eq!(summary.total_volume, 51);
        assert_eq!(summary.total_sets, 6);
        assert_eq!(summary.exercise_count, 1);
    }

    #[test]
    fn distinct_exercise_count_ignores_duplicates() {
        let records = [
            record(1, 1, 1, 10),
            record(2, 1, 1, 10),
            record(1, 1, 1, 10),
            record(3, 1, 1, 10),
            record(2, 1, 1, 10),
        ];

        let summary = daily_summary(test_date(), &records, &[]);
        assert_eq!(summary.exercise_count, 3);
        assert_eq!(summary.total_volume, 50);
        assert_eq!(summary.total_sets, 5);
    }

    #[test]
    fn totals_are_order_independent() {
        let forward = [record(1, 1, 3, 10), record(2, 1, 5, 8)];
        let reversed = [record(2, 1, 5, 8), record(1, 1, 3, 10)];

        let a = daily_summary(test_date(), &forward, &[]);
        let b = daily_summary(test_date(), &reversed, &[]);
        assert_eq!(a.total_volume, b.total_volume);
        assert_eq!(a.total_sets, b.total_sets);
        assert_eq!(a.total_volume, 70);
    }
}
