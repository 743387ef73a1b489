use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ExerciseId, SessionId, SetId};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SetError {
    #[error("set numbers start at 1")]
    InvalidSetNumber,

    #[error("weight must be a finite number, got {0}")]
    InvalidWeight(f64),
}

/// The functional identity of a set row within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetKey {
    pub session_id: SessionId,
    pub exercise_id: ExerciseId,
    pub set_number: u32,
}

impl SetKey {
    /// # Errors
    ///
    /// Returns `SetError::InvalidSetNumber` when `set_number` is zero.
    pub fn new(
        session_id: SessionId,
        exercise_id: ExerciseId,
        set_number: u32,
    ) -> Result<Self, SetError> {
        if set_number == 0 {
            return Err(SetError::InvalidSetNumber);
        }
        Ok(Self {
            session_id,
            exercise_id,
            set_number,
        })
    }
}

/// Weight and reps recorded for one set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SetEntry {
    /// Kilograms.
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

impl SetEntry {
    /// Normalize raw input.
    ///
    /// A zero weight means "not entered" and is dropped.
    ///
    /// # Errors
    ///
    /// Returns `SetError::InvalidWeight` for NaN or infinite weights.
    pub fn new(weight: Option<f64>, reps: Option<u32>) -> Result<Self, SetError> {
        let weight = match weight {
            Some(w) if !w.is_finite() => return Err(SetError::InvalidWeight(w)),
            Some(w) if w == 0.0 => None,
            other => other,
        };
        Ok(Self { weight, reps })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.reps.is_none()
    }
}

/// A logged set of an exercise within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: SetId,
    pub session_id: SessionId,
    pub exercise_id: ExerciseId,
    pub set_number: u32,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl ExerciseSet {
    #[must_use]
    pub fn key(&self) -> SetKey {
        SetKey {
            session_id: self.session_id,
            exercise_id: self.exercise_id,
            set_number: self.set_number,
        }
    }

    #[must_use]
    pub fn entry(&self) -> SetEntry {
        SetEntry {
            weight: self.weight,
            reps: self.reps,
        }
    }

    /// Overwrite the recorded values and mark the set completed at `now`.
    pub fn complete(&mut self, entry: SetEntry, now: DateTime<Utc>) {
        self.weight = entry.weight;
        self.reps = entry.reps;
        self.completed = true;
        self.completed_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn set_key_rejects_zero() {
        let err = SetKey::new(SessionId::new(1), ExerciseId::new(1), 0).unwrap_err();
        assert_eq!(err, SetError::InvalidSetNumber);
    }

    #[test]
    fn entry_drops_zero_weight_and_rejects_nan() {
        let entry = SetEntry::new(Some(0.0), Some(10)).unwrap();
        assert_eq!(entry.weight, None);
        assert_eq!(entry.reps, Some(10));
        assert!(SetEntry::new(Some(f64::NAN), None).is_err());
        assert!(SetEntry::new(None, None).unwrap().is_empty());
    }

    #[test]
    fn complete_overwrites_previous_values() {
        let mut set = ExerciseSet {
            id: SetId::new(1),
            session_id: SessionId::new(1),
            exercise_id: ExerciseId::new(2),
            set_number: 1,
            weight: Some(40.0),
            reps: Some(8),
            completed: true,
            completed_at: Some(fixed_now()),
            notes: None,
        };
        set.complete(SetEntry::new(Some(42.5), None).unwrap(), fixed_now());

        assert_eq!(set.weight, Some(42.5));
        assert_eq!(set.reps, None);
        assert!(set.completed);
    }
}
