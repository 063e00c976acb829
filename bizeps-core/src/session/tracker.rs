use anyhow::Result;
use log::{debug, warn};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::db;
use crate::db::models::{NewWorkoutSession, WorkoutSession};
use crate::db::operations::{complete_session, get_session_by_id, insert_session};
use crate::session::state::SessionState;

/// Coordinates workout sessions over a shared pool.
///
/// The held session id is only a hint: storage can be mutated underneath
/// it (a bulk clear on another screen, for instance), so it is
/// re-resolved before every use and replaced when it went away.
pub struct Tracker {
    pub(crate) pool: SqlitePool,
    pub(crate) state: Mutex<SessionState>,
}

impl Tracker {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            state: Mutex::new(SessionState::NoSession),
        }
    }

    /// Open (or create) the database at `db_path` and wrap it.
    pub async fn open(db_path: &str) -> Result<Self> {
        let pool = db::connect(db_path).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The currently held session id, if any. Purely a snapshot; call
    /// `ensure_session` when you need an id that is known to resolve.
    pub async fn current_session(&self) -> Option<i64> {
        self.state.lock().await.session_id()
    }

    /// Return a session id that resolves in storage, creating a fresh
    /// session when none is held or the held one was deleted out from
    /// under us. Call this before every set save.
    pub async fn ensure_session(&self) -> Result<i64> {
        let mut state = self.state.lock().await;

        if let SessionState::Open(id) = *state {
            if get_session_by_id(&self.pool, id).await?.is_some() {
                return Ok(id);
            }
            warn!("Session {id} no longer exists (likely deleted), creating a new one");
        }

        let session = insert_session(
            &self.pool,
            &NewWorkoutSession {
                start_time: db::now_ts(),
                notes: None,
            },
        )
        .await?;
        debug!("Created new workout session with ID: {}", session.id);
        *state = SessionState::Open(session.id);
        Ok(session.id)
    }

    /// Re-resolve the held session id, e.g. when a screen regains focus.
    /// A session that vanished, or any lookup failure, silently resets
    /// to `NoSession`; the next `ensure_session` recreates transparently.
    pub async fn validate(&self) {
        let mut state = self.state.lock().await;
        if let SessionState::Open(id) = *state {
            match get_session_by_id(&self.pool, id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!("Session validation failed: session {id} no longer exists, resetting");
                    *state = SessionState::NoSession;
                }
                Err(e) => {
                    warn!("Error validating session {id}: {e:#}, resetting");
                    *state = SessionState::NoSession;
                }
            }
        }
    }

    /// Close the open session: stamp the end time, derive the minute
    /// count, and drop back to `NoSession`.
    pub async fn close_session(&self) -> Result<WorkoutSession> {
        let mut state = self.state.lock().await;
        let SessionState::Open(id) = *state else {
            anyhow::bail!("No active workout session to close");
        };

        let session = complete_session(&self.pool, id, db::now_ts()).await?;
        debug!(
            "Closed workout session {} after {} minutes",
            session.id, session.duration_minutes
        );
        *state = SessionState::NoSession;
        Ok(session)
    }
}
