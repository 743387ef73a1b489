mod add_todo_vm;
mod exercise_card_vm;
mod rest_timer;
mod time_fmt;
mod todo_list_vm;
mod workout_vm;

pub use add_todo_vm::{AddTodoFieldError, AddTodoForm};
pub use exercise_card_vm::{ExerciseCardState, ExerciseCardVm, SetSlotVm, map_exercise_card};
pub use rest_timer::{DEFAULT_REST_SECS, RestTimer, TickOutcome, TimerPhase};
pub use time_fmt::{format_countdown, format_date, format_day};
pub use todo_list_vm::{SORT_OPTIONS, TodoItemVm, TodoListState, map_todo_items, stats_label};
pub use workout_vm::{
    DayBadge, DayCardVm, ProgramHeaderVm, ProgramOptionVm, SessionHeaderVm, SessionScreenVm,
    map_day_cards, map_program_options, map_session_screen, next_exercise_index,
};
