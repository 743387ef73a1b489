use std::sync::Arc;

use services::{AppServices, TodoService, WorkoutService};
use workout_core::model::ProgramId;

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn program_id(&self) -> ProgramId;

    fn workouts(&self) -> Arc<WorkoutService>;
    fn todos(&self) -> Arc<TodoService>;
}

impl UiApp for AppServices {
    fn program_id(&self) -> ProgramId {
        AppServices::program_id(self)
    }

    fn workouts(&self) -> Arc<WorkoutService> {
        AppServices::workouts(self)
    }

    fn todos(&self) -> Arc<TodoService> {
        AppServices::todos(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    program_id: ProgramId,
    workouts: Arc<WorkoutService>,
    todos: Arc<TodoService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            program_id: app.program_id(),
            workouts: app.workouts(),
            todos: app.todos(),
        }
    }

    /// Program selected at launch; the workout list can switch away from it.
    #[must_use]
    pub fn program_id(&self) -> ProgramId {
        self.program_id
    }

    #[must_use]
    pub fn workouts(&self) -> Arc<WorkoutService> {
        Arc::clone(&self.workouts)
    }

    #[must_use]
    pub fn todos(&self) -> Arc<TodoService> {
        Arc::clone(&self.todos)
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
