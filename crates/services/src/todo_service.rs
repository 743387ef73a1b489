use std::sync::Arc;

use storage::repository::{StorageError, TodoRepository};
use tracing::info;
use workout_core::model::{Todo, TodoDraft, TodoId, TodoPatch, TodoQuery, TodoStats};

use crate::Clock;
use crate::error::TodoServiceError;

/// Todo list procedures.
#[derive(Clone)]
pub struct TodoService {
    clock: Clock,
    todos: Arc<dyn TodoRepository>,
}

impl TodoService {
    #[must_use]
    pub fn new(clock: Clock, todos: Arc<dyn TodoRepository>) -> Self {
        Self { clock, todos }
    }

    /// Filtered, sorted todos.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if repository access fails.
    pub async fn get_all(&self, query: TodoQuery) -> Result<Vec<Todo>, TodoServiceError> {
        Ok(self.todos.list_todos(query).await?)
    }

    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if repository access fails.
    pub async fn get_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoServiceError> {
        Ok(self.todos.get_todo(id).await?)
    }

    /// Counts over every todo, regardless of the current filter.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if repository access fails.
    pub async fn stats(&self) -> Result<TodoStats, TodoServiceError> {
        let all = self.todos.list_todos(TodoQuery::default()).await?;
        Ok(TodoStats::from_todos(&all))
    }

    /// # Errors
    ///
    /// Returns `TodoServiceError::Validation` for an empty title.
    /// Returns `TodoServiceError::Storage` if persistence fails.
    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, TodoServiceError> {
        let new = draft.validate(self.clock.now())?;
        let todo = self.todos.insert_todo(new).await?;
        info!(todo_id = %todo.id, priority = %todo.priority, "todo created");
        Ok(todo)
    }

    /// Write the provided fields and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Validation` for an empty title.
    /// Returns `TodoServiceError::NotFound` if the todo does not exist.
    /// Returns `TodoServiceError::Storage` if persistence fails.
    pub async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, TodoServiceError> {
        let patch = patch.validate()?;
        let mut todo = self.load(id).await?;
        todo.apply(&patch, self.clock.now());
        self.save(&todo).await?;
        info!(todo_id = %id, "todo updated");
        Ok(todo)
    }

    /// # Errors
    ///
    /// Returns `TodoServiceError::NotFound` if the todo does not exist.
    /// Returns `TodoServiceError::Storage` if persistence fails.
    pub async fn toggle_complete(&self, id: TodoId) -> Result<Todo, TodoServiceError> {
        let mut todo = self.load(id).await?;
        todo.apply(&TodoPatch::completed(!todo.completed), self.clock.now());
        self.save(&todo).await?;
        info!(todo_id = %id, completed = todo.completed, "todo toggled");
        Ok(todo)
    }

    /// Remove a todo. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if persistence fails.
    pub async fn delete(&self, id: TodoId) -> Result<(), TodoServiceError> {
        if self.todos.delete_todo(id).await? {
            info!(todo_id = %id, "todo deleted");
        }
        Ok(())
    }

    /// Remove every completed todo and return how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `TodoServiceError::Storage` if persistence fails.
    pub async fn delete_completed(&self) -> Result<u64, TodoServiceError> {
        let removed = self.todos.delete_completed().await?;
        info!(removed, "cleared completed todos");
        Ok(removed)
    }

    async fn load(&self, id: TodoId) -> Result<Todo, TodoServiceError> {
        self.todos
            .get_todo(id)
            .await?
            .ok_or(TodoServiceError::NotFound(id))
    }

    async fn save(&self, todo: &Todo) -> Result<(), TodoServiceError> {
        self.todos.save_todo(todo).await.map_err(|e| match e {
            StorageError::NotFound => TodoServiceError::NotFound(todo.id),
            other => TodoServiceError::Storage(other),
        })
    }
}
