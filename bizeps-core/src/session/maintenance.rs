//! Exercise management and bulk-delete flows.

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};

use crate::db::models::{Exercise, NewExercise};
use crate::db::operations::{
    delete_all_records, delete_all_sessions, delete_exercise, delete_records_by_date,
    delete_records_by_exercise, delete_sessions_by_date, get_exercise_by_id,
    get_favorite_exercises, insert_exercise, set_favorite,
};
use crate::session::Tracker;
use crate::session::sets::InputError;
use crate::session::state::SessionState;

impl Tracker {
    /// Add a user-created exercise. The name is the only required field.
    pub async fn add_exercise(
        &self,
        name: &str,
        description: &str,
        muscle_group: &str,
    ) -> Result<Exercise> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::EmptyExerciseName.into());
        }

        let exercise = insert_exercise(
            &self.pool,
            &NewExercise {
                name: name.to_string(),
                kind: "strength".to_string(),
                description: description.trim().to_string(),
                muscle_group: muscle_group.trim().to_string(),
                favorite: false,
                custom: true,
            },
        )
        .await?;
        info!("Added exercise {} ({})", exercise.name, exercise.id);
        Ok(exercise)
    }

    pub async fn set_favorite(&self, exercise_id: i64, favorite: bool) -> Result<()> {
        set_favorite(&self.pool, exercise_id, favorite).await?;
        Ok(())
    }

    pub async fn favorite_exercises(&self) -> Result<Vec<Exercise>> {
        get_favorite_exercises(&self.pool).await
    }

    /// Delete an exercise and all workout history referencing it.
    ///
    /// Dependent records go first, then the parent, so the no-orphan
    /// invariant holds even against a store without enforced cascades.
    /// Returns the deleted exercise so callers can name it in a notice.
    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<Exercise> {
        let Some(exercise) = get_exercise_by_id(&self.pool, exercise_id).await? else {
            anyhow::bail!("Exercise with ID {exercise_id} does not exist");
        };

        let removed = delete_records_by_exercise(&self.pool, exercise_id).await?;
        delete_exercise(&self.pool, exercise_id).await?;
        info!(
            "Deleted exercise {} and {} history record(s)",
            exercise.name, removed
        );
        Ok(exercise)
    }

    /// Wipe all records and sessions for one calendar day. Records go
    /// first so a mid-flight failure can never leave orphans behind.
    pub async fn clear_day(&self, date: NaiveDate) -> Result<()> {
        let records = delete_records_by_date(&self.pool, date).await?;
        let sessions = delete_sessions_by_date(&self.pool, date).await?;
        debug!("Cleared {date}: {records} record(s), {sessions} session(s)");

        // The held session may have started on the cleared day.
        self.validate().await;
        Ok(())
    }

    /// Wipe the entire workout history. Exercises themselves survive.
    pub async fn clear_all(&self) -> Result<()> {
        let records = delete_all_records(&self.pool).await?;
        let sessions = delete_all_sessions(&self.pool).await?;
        info!("Cleared all history: {records} record(s), {sessions} session(s)");

        *self.state.lock().await = SessionState::NoSession;
        Ok(())
    }
}
