use serde::{Deserialize, Serialize};
use std::fmt;

// Exercise models
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub muscle_group: String,
    pub favorite: bool,
    pub custom: bool,
}

#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub muscle_group: String,
    pub favorite: bool,
    pub custom: bool,
}

// Workout session models
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSession {
    pub id: i64,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

impl WorkoutSession {
    /// A session stays open until an end time is recorded.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewWorkoutSession {
    pub start_time: i64,
    pub notes: Option<String>,
}

/// Whole minutes between two unix-second timestamps, rounded down.
/// A session closed 90 seconds after opening lasted 1 minute.
pub fn duration_minutes(start_ts: i64, end_ts: i64) -> i64 {
    (end_ts - start_ts).max(0) / 60
}

// Record models
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: i64,
    pub exercise_id: i64,
    pub session_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub timestamp: i64,
    pub notes: Option<String>,
}

impl ExerciseRecord {
    /// Volume contributed by this record: sets × reps. A record normally
    /// holds one set, but pre-aggregated rows with sets > 1 count fully.
    pub fn volume(&self) -> i64 {
        self.sets * self.reps
    }
}

impl fmt::Display for ExerciseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exercise #{}: {} x {:.1}kg x {} reps",
            self.exercise_id, self.sets, self.weight, self.reps
        )
    }
}

#[derive(Debug, Clone)]
pub struct NewExerciseRecord {
    pub exercise_id: i64,
    pub session_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub timestamp: i64,
    pub notes: Option<String>,
}
