mod exercise;
mod ids;
mod program;
mod reps;
mod session;
mod set;
mod todo;

pub use ids::{ExerciseId, ParseIdError, ProgramId, SessionId, SetId, TodoId, WorkoutDayId};

pub use exercise::{Exercise, ExerciseDraft, ExerciseError};
pub use program::{Program, ProgramDraft, ProgramError, WorkoutDay, WorkoutDayDraft};
pub use reps::RepScheme;
pub use session::{ParseStatusError, SessionStatus, SessionUpdate, WorkoutSession};
pub use set::{ExerciseSet, SetEntry, SetError, SetKey};
pub use todo::{
    NewTodo, Priority, SortOrder, Todo, TodoDraft, TodoError, TodoFilter, TodoPatch, TodoQuery,
    TodoSortBy, TodoStats,
};
