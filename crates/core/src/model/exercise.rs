use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ExerciseId, WorkoutDayId};
use crate::model::program::non_blank;
use crate::model::reps::RepScheme;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise name cannot be empty")]
    EmptyName,

    #[error("reps label cannot be empty")]
    EmptyReps,
}

/// A prescribed movement within a workout day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub day_id: WorkoutDayId,
    pub name: String,
    pub description: Option<String>,
    /// Prescribed number of sets.
    pub sets: u32,
    /// Reps label exactly as authored ("8-10", "10/leg", "30s").
    pub reps: String,
    pub order: u32,
    pub muscles_worked: Option<String>,
    pub how_to_do: Option<String>,
}

impl Exercise {
    #[must_use]
    pub fn rep_scheme(&self) -> RepScheme {
        RepScheme::parse(&self.reps)
    }

    /// Set numbers the exercise prescribes, starting at 1.
    pub fn set_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.sets
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub day_id: WorkoutDayId,
    pub name: String,
    pub description: Option<String>,
    pub sets: u32,
    pub reps: String,
    pub order: u32,
    pub muscles_worked: Option<String>,
    pub how_to_do: Option<String>,
}

impl ExerciseDraft {
    /// # Errors
    ///
    /// Returns `ExerciseError` when the name or reps label is blank.
    pub fn validate(self) -> Result<Self, ExerciseError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ExerciseError::EmptyName);
        }
        let reps = self.reps.trim().to_owned();
        if reps.is_empty() {
            return Err(ExerciseError::EmptyReps);
        }
        Ok(Self {
            name,
            reps,
            description: non_blank(self.description),
            muscles_worked: non_blank(self.muscles_worked),
            how_to_do: non_blank(self.how_to_do),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, reps: &str) -> ExerciseDraft {
        ExerciseDraft {
            day_id: WorkoutDayId::new(1),
            name: name.into(),
            description: None,
            sets: 3,
            reps: reps.into(),
            order: 1,
            muscles_worked: Some("Glutes".into()),
            how_to_do: Some(String::new()),
        }
    }

    #[test]
    fn validate_rejects_blank_reps() {
        assert_eq!(
            draft("Lat Pulldown", " ").validate().unwrap_err(),
            ExerciseError::EmptyReps
        );
        assert_eq!(
            draft("", "10").validate().unwrap_err(),
            ExerciseError::EmptyName
        );
    }

    #[test]
    fn validate_normalizes_optional_text() {
        let valid = draft("Lat Pulldown", "10").validate().unwrap();
        assert_eq!(valid.how_to_do, None);
        assert_eq!(valid.muscles_worked.as_deref(), Some("Glutes"));
    }

    #[test]
    fn exercise_exposes_typed_reps_and_set_numbers() {
        let exercise = Exercise {
            id: ExerciseId::new(4),
            day_id: WorkoutDayId::new(1),
            name: "Walking Lunges".into(),
            description: None,
            sets: 3,
            reps: "10/leg".into(),
            order: 1,
            muscles_worked: None,
            how_to_do: None,
        };
        assert!(exercise.rep_scheme().is_per_side());
        assert_eq!(exercise.set_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
