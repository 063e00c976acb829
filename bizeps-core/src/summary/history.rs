//! Grouped, display-ready exercise history for one day.

use std::fmt;

use crate::db::models::ExerciseRecord;

/// Shown in place of an exercise that was deleted after its records
/// were logged. Rendered lowercased like every other name.
pub const MISSING_EXERCISE_NAME: &str = "Unknown Exercise";

/// Emitted instead of an empty string when a day has no records.
pub const NO_DATA_NOTICE: &str = "No exercise details recorded.";

/// One performed set as it appears in a history line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub reps: i64,
    pub weight: f64,
}

impl fmt::Display for SetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weight > 0.0 {
            write!(f, "{:.1}kg×{}", self.weight, self.reps)
        } else {
            write!(f, "{} reps", self.reps)
        }
    }
}

/// All sets of one exercise on one day, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseHistory {
    pub exercise_name: String,
    pub total_sets: i64,
    pub entries: Vec<SetEntry>,
}

impl ExerciseHistory {
    /// Expand records into individual set entries: a record with
    /// sets = N becomes N entries carrying its reps and weight, so a
    /// pre-aggregated "3 sets of 10" row displays as three set tokens.
    pub fn from_records(exercise_name: impl Into<String>, records: &[&ExerciseRecord]) -> Self {
        let mut entries = Vec::new();
        for record in records {
            for _ in 0..record.sets {
                entries.push(SetEntry {
                    reps: record.reps,
                    weight: record.weight,
                });
            }
        }
        Self {
            exercise_name: exercise_name.into(),
            total_sets: entries.len() as i64,
            entries,
        }
    }
}

impl fmt::Display for ExerciseHistory {
    /// `"bench press: 3 sets; 30.0kg×6, 40.0kg×6, 50.0kg×7"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} sets; ",
            self.exercise_name.to_lowercase(),
            self.total_sets
        )?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Group records by exercise id, groups ordered by the exercise's first
/// appearance in the input. That keeps the rendered history stable for
/// a given fetch order instead of leaking map iteration order.
pub fn group_by_exercise(records: &[ExerciseRecord]) -> Vec<(i64, Vec<&ExerciseRecord>)> {
    let mut groups: Vec<(i64, Vec<&ExerciseRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(id, _)| *id == record.exercise_id) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.exercise_id, vec![record])),
        }
    }
    groups
}

/// One line per exercise, newline separated; an explicit notice for an
/// empty day rather than an empty string.
pub fn render_history(histories: &[ExerciseHistory]) -> String {
    if histories.is_empty() {
        return NO_DATA_NOTICE.to_string();
    }
    histories
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
