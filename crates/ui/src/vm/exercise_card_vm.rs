use services::CompleteSetRequest;
use workout_core::model::{Exercise, ExerciseId, ExerciseSet, SessionId};
use workout_core::progress::{ExerciseProgress, LastPerformance};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetSlotVm {
    pub number: u32,
    pub completed: bool,
    pub weight_label: Option<String>,
    pub reps_label: Option<String>,
}

impl SetSlotVm {
    #[must_use]
    pub const fn class(&self) -> &'static str {
        if self.completed { "set-slot done" } else { "set-slot" }
    }
}

/// Read-only card content for one exercise in a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseCardVm {
    pub exercise_id: ExerciseId,
    pub name: String,
    pub prescription: String,
    pub order_label: String,
    pub how_to_do: Option<String>,
    pub muscles_worked: Option<String>,
    pub total_sets: u32,
    pub slots: Vec<SetSlotVm>,
    pub progress_label: String,
    pub last_label: Option<String>,
    pub is_complete: bool,
}

impl ExerciseCardVm {
    #[must_use]
    pub fn has_instructions(&self) -> bool {
        self.how_to_do.is_some() || self.muscles_worked.is_some()
    }
}

#[must_use]
pub fn map_exercise_card(
    exercise: &Exercise,
    sets: &[ExerciseSet],
    progress: &ExerciseProgress,
    last: Option<&LastPerformance>,
) -> ExerciseCardVm {
    let slots = exercise
        .set_numbers()
        .map(|number| {
            let row = sets
                .iter()
                .find(|s| s.exercise_id == exercise.id && s.set_number == number && s.completed);
            SetSlotVm {
                number,
                completed: row.is_some(),
                weight_label: row.and_then(|s| s.weight).map(|w| format!("{w} kg")),
                reps_label: row.and_then(|s| s.reps).map(|r| format!("{r} reps")),
            }
        })
        .collect();

    ExerciseCardVm {
        exercise_id: exercise.id,
        name: exercise.name.clone(),
        prescription: format!("{} sets × {}", exercise.sets, exercise.reps),
        order_label: format!("Exercise {}", exercise.order),
        how_to_do: exercise.how_to_do.clone(),
        muscles_worked: exercise.muscles_worked.clone(),
        total_sets: exercise.sets,
        slots,
        progress_label: format!(
            "{}/{} completed",
            progress.completed_sets, progress.prescribed_sets
        ),
        last_label: last
            .and_then(LastPerformance::label)
            .map(|label| format!("Last time: {label}")),
        is_complete: progress.is_complete,
    }
}

/// Input state of one exercise card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseCardState {
    pub exercise_id: ExerciseId,
    pub total_sets: u32,
    /// `total_sets + 1` once every set is done.
    pub current_set: u32,
    pub weight_input: String,
    pub reps_input: String,
    pub show_instructions: bool,
}

impl ExerciseCardState {
    /// Starts at the first set without a completed row.
    #[must_use]
    pub fn new(card: &ExerciseCardVm) -> Self {
        let current_set = card
            .slots
            .iter()
            .find(|slot| !slot.completed)
            .map_or(card.total_sets + 1, |slot| slot.number);
        Self {
            exercise_id: card.exercise_id,
            total_sets: card.total_sets,
            current_set,
            weight_input: String::new(),
            reps_input: String::new(),
            show_instructions: false,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.current_set > self.total_sets
    }

    /// Positive, finite weight; anything else counts as not entered.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight_input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w > 0.0)
    }

    #[must_use]
    pub fn reps(&self) -> Option<u32> {
        self.reps_input.trim().parse::<u32>().ok().filter(|r| *r > 0)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_done() && (self.weight().is_some() || self.reps().is_some())
    }

    #[must_use]
    pub fn request(&self, session_id: SessionId) -> Option<CompleteSetRequest> {
        self.can_submit().then(|| CompleteSetRequest {
            session_id,
            exercise_id: self.exercise_id,
            set_number: self.current_set,
            weight: self.weight(),
            reps: self.reps(),
        })
    }

    /// Call after a successful completion.
    pub fn advance(&mut self) {
        self.weight_input.clear();
        self.reps_input.clear();
        self.current_set = (self.current_set + 1).min(self.total_sets + 1);
    }

    pub fn toggle_instructions(&mut self) {
        self.show_instructions = !self.show_instructions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_core::model::{SetId, WorkoutDayId};
    use workout_core::progress::exercise_progress;
    use workout_core::time::fixed_now;

    fn exercise() -> Exercise {
        Exercise {
            id: ExerciseId::new(7),
            day_id: WorkoutDayId::new(1),
            name: "Goblet Squat".into(),
            description: None,
            sets: 3,
            reps: "8-10".into(),
            order: 2,
            muscles_worked: Some("Quads".into()),
            how_to_do: None,
        }
    }

    fn done(set_number: u32, weight: Option<f64>, reps: Option<u32>) -> ExerciseSet {
        ExerciseSet {
            id: SetId::new(u64::from(set_number)),
            session_id: SessionId::new(1),
            exercise_id: ExerciseId::new(7),
            set_number,
            weight,
            reps,
            completed: true,
            completed_at: Some(fixed_now()),
            notes: None,
        }
    }

    fn card(sets: &[ExerciseSet]) -> ExerciseCardVm {
        let exercise = exercise();
        let progress = exercise_progress(&exercise, sets);
        map_exercise_card(&exercise, sets, &progress, None)
    }

    #[test]
    fn card_labels_slots_and_progress() {
        let vm = card(&[done(1, Some(20.0), Some(10))]);
        assert_eq!(vm.prescription, "3 sets × 8-10");
        assert_eq!(vm.order_label, "Exercise 2");
        assert_eq!(vm.progress_label, "1/3 completed");
        assert_eq!(vm.slots[0].weight_label.as_deref(), Some("20 kg"));
        assert_eq!(vm.slots[0].reps_label.as_deref(), Some("10 reps"));
        assert!(!vm.slots[1].completed);
        assert!(vm.has_instructions());
    }

    #[test]
    fn state_starts_at_first_open_set() {
        let state = ExerciseCardState::new(&card(&[done(1, None, Some(8)), done(3, None, Some(8))]));
        assert_eq!(state.current_set, 2);

        let all = [
            done(1, None, Some(8)),
            done(2, None, Some(8)),
            done(3, None, Some(8)),
        ];
        assert!(ExerciseCardState::new(&card(&all)).is_done());
    }

    #[test]
    fn submit_needs_a_positive_value() {
        let mut state = ExerciseCardState::new(&card(&[]));
        assert!(!state.can_submit());

        state.weight_input = "0".into();
        assert!(!state.can_submit());

        state.reps_input = "8".into();
        let request = state.request(SessionId::new(4)).unwrap();
        assert_eq!(request.set_number, 1);
        assert_eq!(request.weight, None);
        assert_eq!(request.reps, Some(8));
    }

    #[test]
    fn advance_clears_inputs_and_stops_past_last_set() {
        let mut state = ExerciseCardState::new(&card(&[]));
        for _ in 0..5 {
            state.weight_input = "12.5".into();
            state.advance();
        }
        assert_eq!(state.current_set, 4);
        assert!(state.is_done());
        assert!(state.weight_input.is_empty());
        assert!(state.request(SessionId::new(1)).is_none());
    }
}
