//! Stock exercises for a fresh database.

use anyhow::Result;
use log::info;
use sqlx::SqlitePool;

use crate::db::models::NewExercise;
use crate::db::operations::{get_all_exercises, insert_exercise};

/// Insert the stock exercises when the table is empty. Safe to call on
/// every startup; an already-populated database is left untouched.
pub async fn ensure_default_exercises(pool: &SqlitePool) -> Result<()> {
    if !get_all_exercises(pool).await?.is_empty() {
        return Ok(());
    }

    info!("Empty exercise table, inserting stock exercises");
    for default in default_exercises() {
        insert_exercise(pool, &default).await?;
    }
    Ok(())
}

fn default_exercises() -> Vec<NewExercise> {
    vec![
        NewExercise {
            name: "Biceps Curls".to_string(),
            kind: "strength".to_string(),
            description: "Arm exercise using dumbbells or barbells".to_string(),
            muscle_group: "arms".to_string(),
            favorite: true,
            custom: false,
        },
        NewExercise {
            name: "Pull-ups".to_string(),
            kind: "strength".to_string(),
            description: "Upper body exercise using body weight".to_string(),
            muscle_group: "back".to_string(),
            favorite: true,
            custom: false,
        },
        NewExercise {
            name: "Push-ups".to_string(),
            kind: "strength".to_string(),
            description: "Chest and arm exercise using body weight".to_string(),
            muscle_group: "chest".to_string(),
            favorite: false,
            custom: true,
        },
    ]
}
