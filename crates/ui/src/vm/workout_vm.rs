use services::{DayOverview, SessionOverview};
use workout_core::model::{ExerciseId, Program, ProgramId, WorkoutDayId};
use workout_core::progress::LastPerformance;

use crate::vm::exercise_card_vm::{ExerciseCardVm, map_exercise_card};
use crate::vm::time_fmt::format_day;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayBadge {
    Completed,
    Ready,
}

impl DayBadge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Ready => "Ready",
        }
    }

    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Completed => "badge badge-completed",
            Self::Ready => "badge badge-ready",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCardVm {
    pub day_id: WorkoutDayId,
    pub name: String,
    pub focus: Option<String>,
    pub notes: Option<String>,
    pub exercise_count_label: String,
    pub badge: DayBadge,
    pub last_completed: Option<String>,
}

impl From<&DayOverview> for DayCardVm {
    fn from(overview: &DayOverview) -> Self {
        let badge = if overview.is_completed() {
            DayBadge::Completed
        } else {
            DayBadge::Ready
        };
        let exercise_count_label = match overview.exercise_count {
            1 => "1 exercise".to_owned(),
            n => format!("{n} exercises"),
        };
        Self {
            day_id: overview.day.id,
            name: overview.day.name.clone(),
            focus: overview.day.focus.clone(),
            notes: overview.day.notes.clone(),
            exercise_count_label,
            badge,
            last_completed: overview
                .last_completed_at()
                .map(|at| format!("Last completed: {}", format_day(at))),
        }
    }
}

#[must_use]
pub fn map_day_cards(overviews: &[DayOverview]) -> Vec<DayCardVm> {
    overviews.iter().map(DayCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramOptionVm {
    pub id: ProgramId,
    pub name: String,
    pub selected: bool,
}

#[must_use]
pub fn map_program_options(programs: &[Program], selected: ProgramId) -> Vec<ProgramOptionVm> {
    programs
        .iter()
        .map(|p| ProgramOptionVm {
            id: p.id,
            name: p.name.clone(),
            selected: p.id == selected,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramHeaderVm {
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<String>,
}

impl From<&Program> for ProgramHeaderVm {
    fn from(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            description: program.description.clone(),
            duration: program.duration.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionHeaderVm {
    pub title: String,
    pub summary: String,
    pub percent: u32,
    pub all_exercises_done: bool,
    pub finished: bool,
}

impl SessionHeaderVm {
    /// "Finish Workout" is offered once every exercise is done and the
    /// session is still open.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.all_exercises_done && !self.finished
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionScreenVm {
    pub header: SessionHeaderVm,
    pub cards: Vec<ExerciseCardVm>,
}

#[must_use]
pub fn map_session_screen(
    overview: &SessionOverview,
    last: &[(ExerciseId, LastPerformance)],
) -> SessionScreenVm {
    let progress = &overview.progress;
    let cards = overview
        .exercises
        .iter()
        .filter_map(|exercise| {
            let row = progress.for_exercise(exercise.id)?;
            let previous = last
                .iter()
                .find(|(id, _)| *id == exercise.id)
                .map(|(_, perf)| perf);
            Some(map_exercise_card(exercise, &overview.sets, row, previous))
        })
        .collect();

    SessionScreenVm {
        header: SessionHeaderVm {
            title: overview.day.name.clone(),
            summary: progress.summary(),
            percent: progress.percent(),
            all_exercises_done: progress.is_complete,
            finished: overview.session.is_completed(),
        },
        cards,
    }
}

/// Where focus goes when the rest timer finishes: the next card, or the last
/// one.
#[must_use]
pub fn next_exercise_index(current: usize, total: usize) -> usize {
    if current + 1 < total { current + 1 } else { current }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use workout_core::model::{SessionId, SessionStatus, WorkoutDay, WorkoutSession};
    use workout_core::time::fixed_now;

    fn day() -> WorkoutDay {
        WorkoutDay {
            id: WorkoutDayId::new(2),
            program_id: ProgramId::new(1),
            name: "Day 1".into(),
            focus: Some("Lower body".into()),
            notes: None,
            order: 1,
        }
    }

    fn session(status: SessionStatus) -> WorkoutSession {
        WorkoutSession {
            id: SessionId::new(5),
            day_id: WorkoutDayId::new(2),
            status,
            started_at: fixed_now() - Duration::hours(1),
            completed_at: (status == SessionStatus::Completed).then(fixed_now),
        }
    }

    #[test]
    fn day_badge_follows_latest_session() {
        let ready = DayCardVm::from(&DayOverview {
            day: day(),
            exercise_count: 1,
            latest: Some(session(SessionStatus::InProgress)),
        });
        assert_eq!(ready.badge, DayBadge::Ready);
        assert_eq!(ready.last_completed, None);
        assert_eq!(ready.exercise_count_label, "1 exercise");

        let done = DayCardVm::from(&DayOverview {
            day: day(),
            exercise_count: 5,
            latest: Some(session(SessionStatus::Completed)),
        });
        assert_eq!(done.badge.label(), "Completed");
        assert_eq!(
            done.last_completed.as_deref(),
            Some("Last completed: Nov 14, 2023")
        );
    }

    #[test]
    fn program_options_mark_selection() {
        let programs = vec![
            Program {
                id: ProgramId::new(1),
                name: "A".into(),
                description: None,
                duration: None,
            },
            Program {
                id: ProgramId::new(2),
                name: "B".into(),
                description: None,
                duration: None,
            },
        ];
        let options = map_program_options(&programs, ProgramId::new(2));
        assert!(!options[0].selected);
        assert!(options[1].selected);
    }

    #[test]
    fn focus_moves_forward_and_stops_at_last() {
        assert_eq!(next_exercise_index(0, 5), 1);
        assert_eq!(next_exercise_index(4, 5), 4);
        assert_eq!(next_exercise_index(0, 0), 0);
    }

    #[test]
    fn finish_needs_open_session() {
        let mut header = SessionHeaderVm {
            title: "Day 1".into(),
            summary: "5 of 5 exercises completed".into(),
            percent: 100,
            all_exercises_done: true,
            finished: false,
        };
        assert!(header.can_finish());
        header.finished = true;
        assert!(!header.can_finish());
    }
}
