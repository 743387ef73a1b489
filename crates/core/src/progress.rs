//! Completion progress derived from the sets logged in a session.
//!
//! Everything here is pure: callers fetch exercises and sets, these functions
//! decide what is complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{Exercise, ExerciseId, ExerciseSet, SessionId, WorkoutSession};

//
// ─── EXERCISE PROGRESS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub exercise_id: ExerciseId,
    /// Completed rows for the exercise, whatever their set number.
    pub completed_sets: u32,
    pub prescribed_sets: u32,
    /// Every logged row is completed and enough of them exist.
    pub is_complete: bool,
}

impl ExerciseProgress {
    /// `completed / prescribed`, or 1.0 when nothing is prescribed.
    ///
    /// Not clamped: extra sets push it above 1.0.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.prescribed_sets == 0 {
            return 1.0;
        }
        f64::from(self.completed_sets) / f64::from(self.prescribed_sets)
    }

    /// Ratio as a whole percentage capped at 100, for progress bars.
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent(self.ratio())
    }
}

/// Progress of one exercise given all sets of the session.
///
/// Sets belonging to other exercises are ignored.
#[must_use]
pub fn exercise_progress(exercise: &Exercise, sets: &[ExerciseSet]) -> ExerciseProgress {
    let mut completed_sets = 0u32;
    let mut all_completed = true;
    for set in sets.iter().filter(|s| s.exercise_id == exercise.id) {
        if set.completed {
            completed_sets += 1;
        } else {
            all_completed = false;
        }
    }

    ExerciseProgress {
        exercise_id: exercise.id,
        completed_sets,
        prescribed_sets: exercise.sets,
        is_complete: all_completed && completed_sets >= exercise.sets,
    }
}

//
// ─── SESSION PROGRESS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionProgress {
    /// One entry per exercise, in the order the exercises were given.
    pub exercises: Vec<ExerciseProgress>,
    pub completed_exercises: usize,
    pub total_exercises: usize,
    /// True once every exercise is complete; vacuously true for an empty day.
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn for_exercise(&self, exercise_id: ExerciseId) -> Option<&ExerciseProgress> {
        self.exercises.iter().find(|p| p.exercise_id == exercise_id)
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total_exercises == 0 {
            return 100;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed_exercises as f64 / self.total_exercises as f64;
        percent(ratio)
    }

    /// "X of Y exercises completed".
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} of {} exercises completed",
            self.completed_exercises, self.total_exercises
        )
    }
}

#[must_use]
pub fn session_progress(exercises: &[Exercise], sets: &[ExerciseSet]) -> SessionProgress {
    let mut by_exercise: HashMap<ExerciseId, Vec<ExerciseSet>> = HashMap::new();
    for set in sets {
        by_exercise.entry(set.exercise_id).or_default().push(set.clone());
    }

    let progress: Vec<ExerciseProgress> = exercises
        .iter()
        .map(|exercise| {
            let own = by_exercise
                .get(&exercise.id)
                .map_or(&[][..], Vec::as_slice);
            exercise_progress(exercise, own)
        })
        .collect();

    let completed_exercises = progress.iter().filter(|p| p.is_complete).count();
    SessionProgress {
        total_exercises: progress.len(),
        is_complete: completed_exercises == progress.len(),
        completed_exercises,
        exercises: progress,
    }
}

fn percent(ratio: f64) -> u32 {
    let clamped = (ratio * 100.0).round().clamp(0.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = clamped as u32;
    value
}

//
// ─── LAST PERFORMANCE ──────────────────────────────────────────────────────────
//

/// What the user lifted the last time they finished this exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastPerformance {
    pub session_id: SessionId,
    pub set_number: u32,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&ExerciseSet> for LastPerformance {
    fn from(set: &ExerciseSet) -> Self {
        Self {
            session_id: set.session_id,
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
            completed_at: set.completed_at,
        }
    }
}

impl LastPerformance {
    /// Short label such as "40 kg × 8".
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match (self.weight, self.reps) {
            (Some(w), Some(r)) => Some(format!("{w} kg × {r}")),
            (Some(w), None) => Some(format!("{w} kg")),
            (None, Some(r)) => Some(format!("{r} reps")),
            (None, None) => None,
        }
    }
}

/// Most recent completed set of `exercise_id` within a completed session.
///
/// Ordered by session `completed_at`, then set `completed_at`, then set id,
/// all descending.
#[must_use]
pub fn last_performance<'a>(
    exercise_id: ExerciseId,
    sessions: &[WorkoutSession],
    sets: impl IntoIterator<Item = &'a ExerciseSet>,
) -> Option<LastPerformance> {
    let finished: HashMap<SessionId, &WorkoutSession> = sessions
        .iter()
        .filter(|s| s.is_completed())
        .map(|s| (s.id, s))
        .collect();

    sets.into_iter()
        .filter(|set| set.exercise_id == exercise_id && set.completed)
        .filter_map(|set| finished.get(&set.session_id).map(|session| (*session, set)))
        .max_by(|(sa, a), (sb, b)| compare_recency(sa, a, sb, b))
        .map(|(_, set)| LastPerformance::from(set))
}

fn compare_recency(
    session_a: &WorkoutSession,
    set_a: &ExerciseSet,
    session_b: &WorkoutSession,
    set_b: &ExerciseSet,
) -> Ordering {
    session_a
        .completed_at
        .cmp(&session_b.completed_at)
        .then_with(|| set_a.completed_at.cmp(&set_b.completed_at))
        .then_with(|| set_a.id.cmp(&set_b.id))
}
