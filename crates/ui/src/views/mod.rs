mod state;
mod todos;
mod workout_list;
mod workout_session;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use state::{ViewError, ViewState, todo_view_error, view_state_from_resource, workout_view_error};
pub use todos::TodosView;
pub use workout_list::WorkoutListView;
pub use workout_session::WorkoutSessionView;
