use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use sqlx::SqlitePool;

use crate::db::models::{
    Exercise, ExerciseRecord, NewExercise, NewExerciseRecord, NewWorkoutSession, WorkoutSession,
    duration_minutes,
};

const EXERCISE_COLUMNS: &str = "id, name, kind, description, muscle_group, favorite, custom";
const SESSION_COLUMNS: &str = "id, start_time, end_time, duration_minutes, notes";
const RECORD_COLUMNS: &str = "id, exercise_id, session_id, sets, reps, weight, timestamp, notes";

/// Unix-second bounds `[start, end)` of a calendar day in local time.
/// Date filters compare against these so "today" means the user's today.
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + Duration::days(1);
    (local_ts(start), local_ts(end))
}

fn local_ts(naive: NaiveDateTime) -> i64 {
    chrono::Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| naive.and_utc().timestamp())
}

// Exercises

pub async fn insert_exercise(pool: &SqlitePool, new: &NewExercise) -> Result<Exercise> {
    sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises (name, kind, description, muscle_group, favorite, custom)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING id, name, kind, description, muscle_group, favorite, custom",
    )
    .bind(&new.name)
    .bind(&new.kind)
    .bind(&new.description)
    .bind(&new.muscle_group)
    .bind(new.favorite)
    .bind(new.custom)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn update_exercise(pool: &SqlitePool, exercise: &Exercise) -> Result<u64> {
    sqlx::query(
        "UPDATE exercises
         SET name = ?2, kind = ?3, description = ?4, muscle_group = ?5, favorite = ?6, custom = ?7
         WHERE id = ?1",
    )
    .bind(exercise.id)
    .bind(&exercise.name)
    .bind(&exercise.kind)
    .bind(&exercise.description)
    .bind(&exercise.muscle_group)
    .bind(exercise.favorite)
    .bind(exercise.custom)
    .execute(pool)
    .await
    .map(|r| r.rows_affected())
    .map_err(Into::into)
}

pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<u64> {
    sqlx::query("DELETE FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn get_exercise_by_id(pool: &SqlitePool, exercise_id: i64) -> Result<Option<Exercise>> {
    sqlx::query_as::<_, Exercise>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?1"
    ))
    .bind(exercise_id)
    .fetch_optional(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_all_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY id"
    ))
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_favorite_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE favorite = 1 ORDER BY id"
    ))
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_exercises_by_muscle_group(
    pool: &SqlitePool,
    muscle_group: &str,
) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE muscle_group = ?1 ORDER BY id"
    ))
    .bind(muscle_group)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn set_favorite(pool: &SqlitePool, exercise_id: i64, favorite: bool) -> Result<u64> {
    sqlx::query("UPDATE exercises SET favorite = ?2 WHERE id = ?1")
        .bind(exercise_id)
        .bind(favorite)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

// Workout sessions

pub async fn insert_session(pool: &SqlitePool, new: &NewWorkoutSession) -> Result<WorkoutSession> {
    sqlx::query_as::<_, WorkoutSession>(
        "INSERT INTO workout_sessions (start_time, notes)
         VALUES (?1, ?2)
         RETURNING id, start_time, end_time, duration_minutes, notes",
    )
    .bind(new.start_time)
    .bind(&new.notes)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn update_session(pool: &SqlitePool, session: &WorkoutSession) -> Result<u64> {
    sqlx::query(
        "UPDATE workout_sessions
         SET start_time = ?2, end_time = ?3, duration_minutes = ?4, notes = ?5
         WHERE id = ?1",
    )
    .bind(session.id)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(session.duration_minutes)
    .bind(&session.notes)
    .execute(pool)
    .await
    .map(|r| r.rows_affected())
    .map_err(Into::into)
}

/// Close a session: stamp the end time and derive the minute count from it.
pub async fn complete_session(
    pool: &SqlitePool,
    session_id: i64,
    end_time: i64,
) -> Result<WorkoutSession> {
    let session = sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = ?1"
    ))
    .bind(session_id)
    .fetch_one(pool)
    .await?;

    let duration = duration_minutes(session.start_time, end_time);
    sqlx::query_as::<_, WorkoutSession>(
        "UPDATE workout_sessions SET end_time = ?2, duration_minutes = ?3
         WHERE id = ?1
         RETURNING id, start_time, end_time, duration_minutes, notes",
    )
    .bind(session_id)
    .bind(end_time)
    .bind(duration)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn update_session_notes(
    pool: &SqlitePool,
    session_id: i64,
    notes: Option<String>,
) -> Result<u64> {
    sqlx::query("UPDATE workout_sessions SET notes = ?2 WHERE id = ?1")
        .bind(session_id)
        .bind(notes)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn delete_session(pool: &SqlitePool, session_id: i64) -> Result<u64> {
    sqlx::query("DELETE FROM workout_sessions WHERE id = ?1")
        .bind(session_id)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn get_session_by_id(
    pool: &SqlitePool,
    session_id: i64,
) -> Result<Option<WorkoutSession>> {
    sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = ?1"
    ))
    .bind(session_id)
    .fetch_optional(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_all_sessions(pool: &SqlitePool) -> Result<Vec<WorkoutSession>> {
    sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions ORDER BY start_time DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Sessions that started on the given local calendar day.
pub async fn get_sessions_by_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<WorkoutSession>> {
    let (start, end) = day_bounds(date);
    sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions
         WHERE start_time >= ?1 AND start_time < ?2
         ORDER BY start_time"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn delete_sessions_by_date(pool: &SqlitePool, date: NaiveDate) -> Result<u64> {
    let (start, end) = day_bounds(date);
    sqlx::query("DELETE FROM workout_sessions WHERE start_time >= ?1 AND start_time < ?2")
        .bind(start)
        .bind(end)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn delete_all_sessions(pool: &SqlitePool) -> Result<u64> {
    sqlx::query("DELETE FROM workout_sessions")
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

// Exercise records

pub async fn insert_record(pool: &SqlitePool, new: &NewExerciseRecord) -> Result<ExerciseRecord> {
    sqlx::query_as::<_, ExerciseRecord>(
        "INSERT INTO exercise_records (exercise_id, session_id, sets, reps, weight, timestamp, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING id, exercise_id, session_id, sets, reps, weight, timestamp, notes",
    )
    .bind(new.exercise_id)
    .bind(new.session_id)
    .bind(new.sets)
    .bind(new.reps)
    .bind(new.weight)
    .bind(new.timestamp)
    .bind(&new.notes)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn update_record(pool: &SqlitePool, record: &ExerciseRecord) -> Result<u64> {
    sqlx::query(
        "UPDATE exercise_records
         SET exercise_id = ?2, session_id = ?3, sets = ?4, reps = ?5, weight = ?6,
             timestamp = ?7, notes = ?8
         WHERE id = ?1",
    )
    .bind(record.id)
    .bind(record.exercise_id)
    .bind(record.session_id)
    .bind(record.sets)
    .bind(record.reps)
    .bind(record.weight)
    .bind(record.timestamp)
    .bind(&record.notes)
    .execute(pool)
    .await
    .map(|r| r.rows_affected())
    .map_err(Into::into)
}

pub async fn delete_record(pool: &SqlitePool, record_id: i64) -> Result<u64> {
    sqlx::query("DELETE FROM exercise_records WHERE id = ?1")
        .bind(record_id)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn get_all_records(pool: &SqlitePool) -> Result<Vec<ExerciseRecord>> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM exercise_records ORDER BY timestamp DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Records logged on the given local calendar day, oldest first so the
/// history formatter sees them in the order they were saved.
pub async fn get_records_by_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<ExerciseRecord>> {
    let (start, end) = day_bounds(date);
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM exercise_records
         WHERE timestamp >= ?1 AND timestamp < ?2
         ORDER BY timestamp, id"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_records_by_session(
    pool: &SqlitePool,
    session_id: i64,
) -> Result<Vec<ExerciseRecord>> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM exercise_records WHERE session_id = ?1 ORDER BY id"
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_records_by_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
) -> Result<Vec<ExerciseRecord>> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM exercise_records WHERE exercise_id = ?1
         ORDER BY timestamp DESC"
    ))
    .bind(exercise_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn total_reps_by_exercise_and_date(
    pool: &SqlitePool,
    exercise_id: i64,
    date: NaiveDate,
) -> Result<i64> {
    let (start, end) = day_bounds(date);
    sqlx::query_scalar::<_, Option<i64>>(
        "SELECT SUM(reps) FROM exercise_records
         WHERE exercise_id = ?1 AND timestamp >= ?2 AND timestamp < ?3",
    )
    .bind(exercise_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
    .map(|total| total.unwrap_or(0))
    .map_err(Into::into)
}

pub async fn delete_records_by_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<u64> {
    sqlx::query("DELETE FROM exercise_records WHERE exercise_id = ?1")
        .bind(exercise_id)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn delete_records_by_date(pool: &SqlitePool, date: NaiveDate) -> Result<u64> {
    let (start, end) = day_bounds(date);
    sqlx::query("DELETE FROM exercise_records WHERE timestamp >= ?1 AND timestamp < ?2")
        .bind(start)
        .bind(end)
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

pub async fn delete_all_records(pool: &SqlitePool) -> Result<u64> {
    sqlx::query("DELETE FROM exercise_records")
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(end - start, 24 * 60 * 60);

        let (next_start, _) = day_bounds(date + Duration::days(1));
        assert_eq!(next_start, end);
    }
}
