use dioxus::prelude::*;
use services::{TodoServiceError, WorkoutServiceError};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "That item no longer exists.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Map a workout failure for display, logging it once here.
pub fn workout_view_error(action: &'static str, err: &WorkoutServiceError) -> ViewError {
    warn!(action, error = %err, "workout action failed");
    match err {
        WorkoutServiceError::ProgramNotFound(_)
        | WorkoutServiceError::DayNotFound(_)
        | WorkoutServiceError::SessionNotFound(_)
        | WorkoutServiceError::ExerciseNotFound(_) => ViewError::NotFound,
        _ => ViewError::Unknown,
    }
}

pub fn todo_view_error(action: &'static str, err: &TodoServiceError) -> ViewError {
    warn!(action, error = %err, "todo action failed");
    match err {
        TodoServiceError::NotFound(_) => ViewError::NotFound,
        _ => ViewError::Unknown,
    }
}
