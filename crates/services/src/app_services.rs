use std::sync::Arc;

use storage::repository::Storage;
use workout_core::model::ProgramId;

use crate::Clock;
use crate::error::AppServicesError;
use crate::seed::seed_default_program;
use crate::todo_service::TodoService;
use crate::workout_service::WorkoutService;

/// Assembles app-facing services and remembers which program to show first.
#[derive(Clone)]
pub struct AppServices {
    program_id: ProgramId,
    workouts: Arc<WorkoutService>,
    todos: Arc<TodoService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// The built-in program is seeded when the catalog is empty.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        preferred_program_id: ProgramId,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, preferred_program_id).await
    }

    /// Build services over in-memory storage, seeded with the built-in program.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if seeding fails.
    pub async fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, ProgramId::new(1)).await
    }

    async fn from_storage(
        storage: Storage,
        clock: Clock,
        preferred_program_id: ProgramId,
    ) -> Result<Self, AppServicesError> {
        let program_id = ensure_program(&storage, preferred_program_id).await?;
        Ok(Self {
            program_id,
            workouts: Arc::new(WorkoutService::from_storage(clock, &storage)),
            todos: Arc::new(TodoService::new(clock, Arc::clone(&storage.todos))),
        })
    }

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

/// Resolve a usable program id, seeding the built-in program when there are
/// none.
async fn ensure_program(
    storage: &Storage,
    preferred: ProgramId,
) -> Result<ProgramId, AppServicesError> {
    if storage.programs.get_program(preferred).await?.is_some() {
        return Ok(preferred);
    }

    let existing = storage.programs.list_programs().await?;
    if let Some(first) = existing.first() {
        return Ok(first.id);
    }

    let outcome = seed_default_program(storage.programs.as_ref()).await?;
    Ok(outcome.program_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_core::time::fixed_now;

    #[tokio::test]
    async fn in_memory_services_seed_and_resolve_program() {
        let services = AppServices::in_memory(Clock::Fixed(fixed_now()))
            .await
            .unwrap();
        let programs = services.workouts().get_programs().await.unwrap();

        assert_eq!(programs.len(), 1);
        assert_eq!(services.program_id(), programs[0].id);
    }
}
