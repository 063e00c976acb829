use anyhow::Result;
use log::debug;
use thiserror::Error;

use crate::db;
use crate::db::models::{ExerciseRecord, NewExerciseRecord};
use crate::db::operations::{get_exercise_by_id, insert_record};
use crate::session::Tracker;

/// Rejections for raw user input, checked before anything reaches the
/// core. Aggregation and formatting accept whatever numbers they are
/// given; these are the only gates.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("Please enter a valid weight")]
    InvalidWeight,
    #[error("Please set the number of reps")]
    MissingReps,
    #[error("Exercise name must not be empty")]
    EmptyExerciseName,
}

/// Parse a weight field. Empty input means bodyweight (0.0); anything
/// non-empty must parse as a number.
pub fn parse_weight(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|_| InputError::InvalidWeight)
}

/// A set needs at least one rep to be worth saving.
pub fn validate_reps(reps: i64) -> Result<i64, InputError> {
    if reps <= 0 {
        return Err(InputError::MissingReps);
    }
    Ok(reps)
}

impl Tracker {
    /// Save one performed set. Verifies the exercise still exists,
    /// ensures a live session, then inserts a record with sets = 1,
    /// in that order, so a later read from the same session sees the
    /// record.
    pub async fn log_set(
        &self,
        exercise_id: i64,
        reps: i64,
        weight: f64,
    ) -> Result<ExerciseRecord> {
        let Some(exercise) = get_exercise_by_id(&self.pool, exercise_id).await? else {
            anyhow::bail!("Exercise with ID {exercise_id} does not exist");
        };

        let session_id = self.ensure_session().await?;

        let record = insert_record(
            &self.pool,
            &NewExerciseRecord {
                exercise_id,
                session_id,
                sets: 1,
                reps,
                weight,
                timestamp: db::now_ts(),
                notes: None,
            },
        )
        .await?;

        debug!(
            "Set saved for {}: {:.1}kg x {} reps (session {})",
            exercise.name, weight, reps, session_id
        );
        Ok(record)
    }
}
