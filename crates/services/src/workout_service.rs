use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::repository::{
    NewSessionRecord, ProgramRepository, SessionRepository, SetRepository, Storage,
};
use tracing::{debug, info};
use workout_core::model::{
    Exercise, ExerciseId, ExerciseSet, Program, ProgramId, SessionId, SessionStatus,
    SessionUpdate, SetEntry, SetKey, WorkoutDay, WorkoutDayId, WorkoutSession,
};
use workout_core::progress::{LastPerformance, SessionProgress, session_progress};

use crate::Clock;
use crate::error::WorkoutServiceError;

/// Input for recording one set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompleteSetRequest {
    pub session_id: SessionId,
    pub exercise_id: ExerciseId,
    pub set_number: u32,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

/// Partial session update: status always, timestamps only when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl UpdateSessionRequest {
    #[must_use]
    pub fn status(session_id: SessionId, status: SessionStatus) -> Self {
        Self {
            session_id,
            status,
            started_at: None,
            completed_at: None,
        }
    }

    fn as_update(&self) -> SessionUpdate {
        SessionUpdate {
            status: self.status,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

/// Everything the session screen needs in one read.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOverview {
    pub session: WorkoutSession,
    pub day: WorkoutDay,
    pub exercises: Vec<Exercise>,
    pub sets: Vec<ExerciseSet>,
    pub progress: SessionProgress,
}

/// A day plus its most recent session, for the day picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverview {
    pub day: WorkoutDay,
    pub exercise_count: usize,
    /// Head of the day's history, if any.
    pub latest: Option<WorkoutSession>,
}

impl DayOverview {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.latest.as_ref().is_some_and(WorkoutSession::is_completed)
    }

    #[must_use]
    pub fn last_completed_at(&self) -> Option<DateTime<Utc>> {
        self.latest.as_ref().and_then(|s| s.completed_at)
    }
}

/// Session Lifecycle Manager and Set Completion Tracker over the program
/// catalog.
#[derive(Clone)]
pub struct WorkoutService {
    clock: Clock,
    programs: Arc<dyn ProgramRepository>,
    sessions: Arc<dyn SessionRepository>,
    sets: Arc<dyn SetRepository>,
}

impl WorkoutService {
    #[must_use]
    pub fn new(
        clock: Clock,
        programs: Arc<dyn ProgramRepository>,
        sessions: Arc<dyn SessionRepository>,
        sets: Arc<dyn SetRepository>,
    ) -> Self {
        Self {
            clock,
            programs,
            sessions,
            sets,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(
            clock,
            Arc::clone(&storage.programs),
            Arc::clone(&storage.sessions),
            Arc::clone(&storage.sets),
        )
    }

    //
    // ─── CATALOG ───────────────────────────────────────────────────────────────
    //

    /// All programs ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_programs(&self) -> Result<Vec<Program>, WorkoutServiceError> {
        Ok(self.programs.list_programs().await?)
    }

    /// The preferred program, or the first one when it does not exist.
    ///
    /// Returns `Ok(None)` only when there are no programs at all.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn resolve_program(
        &self,
        preferred: ProgramId,
    ) -> Result<Option<Program>, WorkoutServiceError> {
        if let Some(program) = self.programs.get_program(preferred).await? {
            return Ok(Some(program));
        }
        Ok(self.programs.list_programs().await?.into_iter().next())
    }

    /// Days of a program in display order.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_workout_days(
        &self,
        program_id: ProgramId,
    ) -> Result<Vec<WorkoutDay>, WorkoutServiceError> {
        Ok(self.programs.list_days(program_id).await?)
    }

    /// Days with their exercise count and latest session.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::ProgramNotFound` for an unknown program.
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn day_overviews(
        &self,
        program_id: ProgramId,
    ) -> Result<Vec<DayOverview>, WorkoutServiceError> {
        if self.programs.get_program(program_id).await?.is_none() {
            return Err(WorkoutServiceError::ProgramNotFound(program_id));
        }

        let days = self.programs.list_days(program_id).await?;
        let mut out = Vec::with_capacity(days.len());
        for day in days {
            let exercise_count = self.programs.list_exercises(day.id).await?.len();
            let latest = self.sessions.sessions_for_day(day.id).await?.into_iter().next();
            out.push(DayOverview {
                day,
                exercise_count,
                latest,
            });
        }
        Ok(out)
    }

    //
    // ─── SESSIONS ──────────────────────────────────────────────────────────────
    //

    /// Reuse the day's in-progress session, or start a new one now.
    ///
    /// At most one row is inserted per call. Two concurrent calls for the same
    /// day can still both insert.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::DayNotFound` if the day does not exist.
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_or_create_session(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<WorkoutSession, WorkoutServiceError> {
        if let Some(existing) = self.sessions.find_in_progress(day_id).await? {
            debug!(session_id = %existing.id, %day_id, "reusing in-progress session");
            return Ok(existing);
        }

        if self.programs.get_day(day_id).await?.is_none() {
            return Err(WorkoutServiceError::DayNotFound(day_id));
        }

        let session = self
            .sessions
            .insert_session(NewSessionRecord::in_progress(day_id, self.clock.now()))
            .await?;
        info!(session_id = %session.id, %day_id, "started workout session");
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_session(
        &self,
        session_id: SessionId,
    ) -> Result<Option<WorkoutSession>, WorkoutServiceError> {
        Ok(self.sessions.get_session(session_id).await?)
    }

    /// Exercises of the session's day in display order; empty when the session
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_session_exercises(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Exercise>, WorkoutServiceError> {
        match self.sessions.get_session(session_id).await? {
            Some(session) => Ok(self.programs.list_exercises(session.day_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_session_sets(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ExerciseSet>, WorkoutServiceError> {
        Ok(self.sets.sets_for_session(session_id).await?)
    }

    /// Write the status and any provided timestamps.
    ///
    /// No transition is rejected; completed sessions can go back to in
    /// progress.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::SessionNotFound` for an unknown session.
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn update_session(
        &self,
        request: UpdateSessionRequest,
    ) -> Result<WorkoutSession, WorkoutServiceError> {
        let session_id = request.session_id;
        let updated = self
            .sessions
            .update_session(session_id, &request.as_update())
            .await
            .map_err(|e| match e {
                storage::repository::StorageError::NotFound => {
                    WorkoutServiceError::SessionNotFound(session_id)
                }
                other => WorkoutServiceError::Storage(other),
            })?;
        info!(%session_id, status = %updated.status, "session status updated");
        Ok(updated)
    }

    /// Mark the session completed now.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_session`].
    pub async fn finish_session(
        &self,
        session_id: SessionId,
    ) -> Result<WorkoutSession, WorkoutServiceError> {
        self.update_session(UpdateSessionRequest {
            completed_at: Some(self.clock.now()),
            ..UpdateSessionRequest::status(session_id, SessionStatus::Completed)
        })
        .await
    }

    /// All sessions of a day, most recently completed first.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_workout_history(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Vec<WorkoutSession>, WorkoutServiceError> {
        Ok(self.sessions.sessions_for_day(day_id).await?)
    }

    //
    // ─── SETS ──────────────────────────────────────────────────────────────────
    //

    /// Upsert the set identified by (session, exercise, set number) and mark it
    /// completed. Re-completing overwrites the previous values.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::InvalidSet` for set number 0 or a
    /// non-finite weight.
    /// Returns `WorkoutServiceError::SessionNotFound` or `ExerciseNotFound`
    /// when either side of the key is unknown.
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn complete_set(
        &self,
        request: CompleteSetRequest,
    ) -> Result<ExerciseSet, WorkoutServiceError> {
        let key = SetKey::new(request.session_id, request.exercise_id, request.set_number)?;
        let entry = SetEntry::new(request.weight, request.reps)?;

        if self.sessions.get_session(key.session_id).await?.is_none() {
            return Err(WorkoutServiceError::SessionNotFound(key.session_id));
        }
        if self.programs.get_exercise(key.exercise_id).await?.is_none() {
            return Err(WorkoutServiceError::ExerciseNotFound(key.exercise_id));
        }

        let now = self.clock.now();
        let set = match self.sets.find_set(key).await? {
            Some(existing) => {
                self.sets
                    .complete_existing_set(existing.id, entry, now)
                    .await?
            }
            None => self.sets.insert_completed_set(key, entry, now).await?,
        };

        info!(
            session_id = %key.session_id,
            exercise_id = %key.exercise_id,
            set_number = key.set_number,
            weight = ?set.weight,
            reps = ?set.reps,
            "set completed"
        );
        Ok(set)
    }

    /// Weight and reps from the latest completed set of this exercise in a
    /// completed session.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn get_last_completed_session(
        &self,
        exercise_id: ExerciseId,
    ) -> Result<Option<LastPerformance>, WorkoutServiceError> {
        Ok(self.sets.last_performance(exercise_id).await?)
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn session_progress(
        &self,
        session_id: SessionId,
    ) -> Result<SessionProgress, WorkoutServiceError> {
        let exercises = self.get_session_exercises(session_id).await?;
        let sets = self.get_session_sets(session_id).await?;
        Ok(session_progress(&exercises, &sets))
    }

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::SessionNotFound` for an unknown session.
    /// Returns `WorkoutServiceError::DayNotFound` if its day is gone.
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn session_overview(
        &self,
        session_id: SessionId,
    ) -> Result<SessionOverview, WorkoutServiceError> {
        let session = self
            .sessions
            .get_session(session_id)
            .await?
            .ok_or(WorkoutServiceError::SessionNotFound(session_id))?;
        let day = self
            .programs
            .get_day(session.day_id)
            .await?
            .ok_or(WorkoutServiceError::DayNotFound(session.day_id))?;
        let exercises = self.programs.list_exercises(day.id).await?;
        let sets = self.sets.sets_for_session(session_id).await?;
        let progress = session_progress(&exercises, &sets);

        Ok(SessionOverview {
            session,
            day,
            exercises,
            sets,
            progress,
        })
    }
}
