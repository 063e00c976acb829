//! Daily summary and history reporting: fetch, then pure computation.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::operations::{get_exercise_by_id, get_records_by_date, get_sessions_by_date};
use crate::session::Tracker;
use crate::summary::{
    DailySummary, ExerciseHistory, MISSING_EXERCISE_NAME, daily_summary, group_by_exercise,
    render_history,
};

/// Display name for an exercise id, lowercase-agnostic: the formatter
/// lowercases on render. An id that no longer resolves (the exercise
/// was deleted after its records were logged) maps to the placeholder
/// instead of failing the whole report.
pub async fn resolve_exercise_name(pool: &SqlitePool, exercise_id: i64) -> Result<String> {
    Ok(get_exercise_by_id(pool, exercise_id)
        .await?
        .map(|e| e.name)
        .unwrap_or_else(|| MISSING_EXERCISE_NAME.to_string()))
}

impl Tracker {
    /// Totals for one calendar day.
    pub async fn summary_for_date(&self, date: NaiveDate) -> Result<DailySummary> {
        let records = get_records_by_date(&self.pool, date).await?;
        let sessions = get_sessions_by_date(&self.pool, date).await?;
        Ok(daily_summary(date, &records, &sessions))
    }

    /// One formatted line per exercise for the day, grouped in
    /// first-appearance order of the day's records.
    pub async fn history_for_date(&self, date: NaiveDate) -> Result<String> {
        let records = get_records_by_date(&self.pool, date).await?;

        let mut histories: Vec<ExerciseHistory> = Vec::new();
        for (exercise_id, group) in group_by_exercise(&records) {
            let name = resolve_exercise_name(&self.pool, exercise_id).await?;
            histories.push(ExerciseHistory::from_records(name, &group));
        }
        Ok(render_history(&histories))
    }
}
