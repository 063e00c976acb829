//! Serial storage worker.
//!
//! One spawned task owns the [`Tracker`] and drains a single command
//! queue in arrival order, so no two storage operations from this
//! subsystem are ever in flight at once. Results travel back over
//! per-command oneshot channels; pure computation (aggregation,
//! formatting) happens inside the worker on already-fetched rows.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use log::debug;
use tokio::sync::{mpsc, oneshot};

use crate::db::models::{Exercise, ExerciseRecord, WorkoutSession};
use crate::session::Tracker;
use crate::summary::DailySummary;

const QUEUE_DEPTH: usize = 64;

enum Command {
    LogSet {
        exercise_id: i64,
        reps: i64,
        weight: f64,
        reply: oneshot::Sender<Result<ExerciseRecord>>,
    },
    CloseSession {
        reply: oneshot::Sender<Result<WorkoutSession>>,
    },
    SummaryForDate {
        date: NaiveDate,
        reply: oneshot::Sender<Result<DailySummary>>,
    },
    HistoryForDate {
        date: NaiveDate,
        reply: oneshot::Sender<Result<String>>,
    },
    AddExercise {
        name: String,
        description: String,
        muscle_group: String,
        reply: oneshot::Sender<Result<Exercise>>,
    },
    SetFavorite {
        exercise_id: i64,
        favorite: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    FavoriteExercises {
        reply: oneshot::Sender<Result<Vec<Exercise>>>,
    },
    DeleteExercise {
        exercise_id: i64,
        reply: oneshot::Sender<Result<Exercise>>,
    },
    ClearDay {
        date: NaiveDate,
        reply: oneshot::Sender<Result<()>>,
    },
    ClearAll {
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Spawn the worker task and hand back its queue.
///
/// The task runs until every handle is dropped; commands already queued
/// at that point still execute to completion before it exits, so an
/// in-flight write is never rolled back just because its caller went
/// away. Replies to vanished callers are discarded.
pub fn spawn(tracker: Tracker) -> WorkerHandle {
    let (tx, mut rx) = mpsc::channel::<Command>(QUEUE_DEPTH);

    tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            dispatch(&tracker, command).await;
        }
        debug!("Storage worker queue closed, exiting");
    });

    WorkerHandle { tx }
}

async fn dispatch(tracker: &Tracker, command: Command) {
    match command {
        Command::LogSet {
            exercise_id,
            reps,
            weight,
            reply,
        } => {
            let _ = reply.send(tracker.log_set(exercise_id, reps, weight).await);
        }
        Command::CloseSession { reply } => {
            let _ = reply.send(tracker.close_session().await);
        }
        Command::SummaryForDate { date, reply } => {
            let _ = reply.send(tracker.summary_for_date(date).await);
        }
        Command::HistoryForDate { date, reply } => {
            let _ = reply.send(tracker.history_for_date(date).await);
        }
        Command::AddExercise {
            name,
            description,
            muscle_group,
            reply,
        } => {
            let _ = reply.send(tracker.add_exercise(&name, &description, &muscle_group).await);
        }
        Command::SetFavorite {
            exercise_id,
            favorite,
            reply,
        } => {
            let _ = reply.send(tracker.set_favorite(exercise_id, favorite).await);
        }
        Command::FavoriteExercises { reply } => {
            let _ = reply.send(tracker.favorite_exercises().await);
        }
        Command::DeleteExercise { exercise_id, reply } => {
            let _ = reply.send(tracker.delete_exercise(exercise_id).await);
        }
        Command::ClearDay { date, reply } => {
            let _ = reply.send(tracker.clear_day(date).await);
        }
        Command::ClearAll { reply } => {
            let _ = reply.send(tracker.clear_all().await);
        }
    }
}

/// Clone-able sender side of the worker queue.
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Command>,
}

impl WorkerHandle {
    async fn request<T>(
        &self,
        command: Command,
        rx: oneshot::Receiver<Result<T>>,
    ) -> Result<T> {
        self.tx
            .send(command)
            .await
            .map_err(|_| anyhow!("Storage worker is gone"))?;
        rx.await
            .map_err(|_| anyhow!("Storage worker dropped the request"))?
    }

    pub async fn log_set(
        &self,
        exercise_id: i64,
        reps: i64,
        weight: f64,
    ) -> Result<ExerciseRecord> {
        let (reply, rx) = oneshot::channel();
        self.request(
            Command::LogSet {
                exercise_id,
                reps,
                weight,
                reply,
            },
            rx,
        )
        .await
    }

    pub async fn close_session(&self) -> Result<WorkoutSession> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::CloseSession { reply }, rx).await
    }

    pub async fn summary_for_date(&self, date: NaiveDate) -> Result<DailySummary> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::SummaryForDate { date, reply }, rx)
            .await
    }

    pub async fn history_for_date(&self, date: NaiveDate) -> Result<String> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::HistoryForDate { date, reply }, rx)
            .await
    }

    pub async fn add_exercise(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        muscle_group: impl Into<String>,
    ) -> Result<Exercise> {
        let (reply, rx) = oneshot::channel();
        self.request(
            Command::AddExercise {
                name: name.into(),
                description: description.into(),
                muscle_group: muscle_group.into(),
                reply,
            },
            rx,
        )
        .await
    }

    pub async fn set_favorite(&self, exercise_id: i64, favorite: bool) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.request(
            Command::SetFavorite {
                exercise_id,
                favorite,
                reply,
            },
            rx,
        )
        .await
    }

    pub async fn favorite_exercises(&self) -> Result<Vec<Exercise>> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::FavoriteExercises { reply }, rx).await
    }

    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<Exercise> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::DeleteExercise { exercise_id, reply }, rx)
            .await
    }

    pub async fn clear_day(&self, date: NaiveDate) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::ClearDay { date, reply }, rx).await
    }

    pub async fn clear_all(&self) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::ClearAll { reply }, rx).await
    }
}
