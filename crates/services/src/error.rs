//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use workout_core::model::{
    ExerciseError, ExerciseId, ProgramError, ProgramId, SessionId, SetError, TodoError, TodoId,
    WorkoutDayId,
};

/// Errors emitted by `WorkoutService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkoutServiceError {
    #[error("program {0} not found")]
    ProgramNotFound(ProgramId),
    #[error("workout day {0} not found")]
    DayNotFound(WorkoutDayId),
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("exercise {0} not found")]
    ExerciseNotFound(ExerciseId),
    #[error(transparent)]
    InvalidSet(#[from] SetError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TodoService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TodoServiceError {
    #[error("Todo not found")]
    NotFound(TodoId),
    #[error(transparent)]
    Validation(#[from] TodoError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while seeding the program catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}
