use thiserror::Error;

use crate::model::{ExerciseError, ParseStatusError, ProgramError, SetError, TodoError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Set(#[from] SetError),
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error(transparent)]
    Status(#[from] ParseStatusError),
}
