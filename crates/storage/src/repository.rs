use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use workout_core::model::{
    Exercise, ExerciseDraft, ExerciseId, ExerciseSet, NewTodo, Program, ProgramDraft, ProgramId,
    SessionId, SessionStatus, SessionUpdate, SetEntry, SetId, SetKey, Todo, TodoId, TodoQuery,
    WorkoutDay, WorkoutDayDraft, WorkoutDayId, WorkoutSession,
};
use workout_core::progress::{LastPerformance, last_performance};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Values for a brand-new session row; the store assigns the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSessionRecord {
    pub day_id: WorkoutDayId,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
}

impl NewSessionRecord {
    #[must_use]
    pub fn in_progress(day_id: WorkoutDayId, started_at: DateTime<Utc>) -> Self {
        Self {
            day_id,
            status: SessionStatus::InProgress,
            started_at,
        }
    }
}

/// Program catalog: programs, their days and the exercises of each day.
///
/// Written once at seed time and read everywhere else.
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the program cannot be stored.
    async fn insert_program(&self, program: ProgramDraft) -> Result<ProgramId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the day cannot be stored (including an
    /// unknown program on backends that enforce references).
    async fn insert_day(&self, day: WorkoutDayDraft) -> Result<WorkoutDayId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the exercise cannot be stored.
    async fn insert_exercise(&self, exercise: ExerciseDraft) -> Result<ExerciseId, StorageError>;

    /// All programs ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn list_programs(&self) -> Result<Vec<Program>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn get_program(&self, id: ProgramId) -> Result<Option<Program>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, StorageError>;

    /// Days of a program ordered by `order`, then id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn list_days(&self, program_id: ProgramId) -> Result<Vec<WorkoutDay>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn get_day(&self, id: WorkoutDayId) -> Result<Option<WorkoutDay>, StorageError>;

    /// Exercises of a day ordered by `order`, then id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn list_exercises(&self, day_id: WorkoutDayId) -> Result<Vec<Exercise>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn get_exercise(&self, id: ExerciseId) -> Result<Option<Exercise>, StorageError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn insert_session(
        &self,
        session: NewSessionRecord,
    ) -> Result<WorkoutSession, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn get_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError>;

    /// Any in-progress session for the day, lowest id first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn find_in_progress(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Option<WorkoutSession>, StorageError>;

    /// Apply a partial update and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the session does not exist.
    async fn update_session(
        &self,
        id: SessionId,
        update: &SessionUpdate,
    ) -> Result<WorkoutSession, StorageError>;

    /// Sessions of a day, most recently completed first; unfinished sessions
    /// last. Ties by id descending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn sessions_for_day(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Vec<WorkoutSession>, StorageError>;
}

#[async_trait]
pub trait SetRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn find_set(&self, key: SetKey) -> Result<Option<ExerciseSet>, StorageError>;

    /// Insert a completed set row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_completed_set(
        &self,
        key: SetKey,
        entry: SetEntry,
        completed_at: DateTime<Utc>,
    ) -> Result<ExerciseSet, StorageError>;

    /// Overwrite weight/reps of an existing row and mark it completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the row does not exist.
    async fn complete_existing_set(
        &self,
        id: SetId,
        entry: SetEntry,
        completed_at: DateTime<Utc>,
    ) -> Result<ExerciseSet, StorageError>;

    /// Sets of a session ordered by set number, then id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn sets_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ExerciseSet>, StorageError>;

    /// Latest completed set of an exercise across completed sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn last_performance(
        &self,
        exercise_id: ExerciseId,
    ) -> Result<Option<LastPerformance>, StorageError>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the todo cannot be stored.
    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>, StorageError>;

    /// Filtered and sorted todos.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn list_todos(&self, query: TodoQuery) -> Result<Vec<Todo>, StorageError>;

    /// Replace the stored row with `todo`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no todo has that id.
    async fn save_todo(&self, todo: &Todo) -> Result<(), StorageError>;

    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on write failure.
    async fn delete_todo(&self, id: TodoId) -> Result<bool, StorageError>;

    /// Remove every completed todo and return how many went.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on write failure.
    async fn delete_completed(&self) -> Result<u64, StorageError>;
}

//
// ─── IN MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryTables {
    next_id: u64,
    programs: BTreeMap<ProgramId, Program>,
    days: BTreeMap<WorkoutDayId, WorkoutDay>,
    exercises: BTreeMap<ExerciseId, Exercise>,
    sessions: BTreeMap<SessionId, WorkoutSession>,
    sets: BTreeMap<SetId, ExerciseSet>,
    todos: BTreeMap<TodoId, Todo>,
}

impl MemoryTables {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Ids come from one shared counter, so they are unique across tables.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<MemoryTables>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryTables>, StorageError> {
        self.tables
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ProgramRepository for InMemoryRepository {
    async fn insert_program(&self, program: ProgramDraft) -> Result<ProgramId, StorageError> {
        let mut guard = self.lock()?;
        let id = ProgramId::new(guard.allocate());
        guard.programs.insert(
            id,
            Program {
                id,
                name: program.name,
                description: program.description,
                duration: program.duration,
            },
        );
        Ok(id)
    }

    async fn insert_day(&self, day: WorkoutDayDraft) -> Result<WorkoutDayId, StorageError> {
        let mut guard = self.lock()?;
        let id = WorkoutDayId::new(guard.allocate());
        guard.days.insert(
            id,
            WorkoutDay {
                id,
                program_id: day.program_id,
                name: day.name,
                focus: day.focus,
                notes: day.notes,
                order: day.order,
            },
        );
        Ok(id)
    }

    async fn insert_exercise(&self, exercise: ExerciseDraft) -> Result<ExerciseId, StorageError> {
        let mut guard = self.lock()?;
        let id = ExerciseId::new(guard.allocate());
        guard.exercises.insert(
            id,
            Exercise {
                id,
                day_id: exercise.day_id,
                name: exercise.name,
                description: exercise.description,
                sets: exercise.sets,
                reps: exercise.reps,
                order: exercise.order,
                muscles_worked: exercise.muscles_worked,
                how_to_do: exercise.how_to_do,
            },
        );
        Ok(id)
    }

    async fn list_programs(&self) -> Result<Vec<Program>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.programs.values().cloned().collect())
    }

    async fn get_program(&self, id: ProgramId) -> Result<Option<Program>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.programs.get(&id).cloned())
    }

    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.programs.values().find(|p| p.name == name).cloned())
    }

    async fn list_days(&self, program_id: ProgramId) -> Result<Vec<WorkoutDay>, StorageError> {
        let guard = self.lock()?;
        let mut days: Vec<WorkoutDay> = guard
            .days
            .values()
            .filter(|d| d.program_id == program_id)
            .cloned()
            .collect();
        days.sort_by_key(|d| (d.order, d.id));
        Ok(days)
    }

    async fn get_day(&self, id: WorkoutDayId) -> Result<Option<WorkoutDay>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.days.get(&id).cloned())
    }

    async fn list_exercises(&self, day_id: WorkoutDayId) -> Result<Vec<Exercise>, StorageError> {
        let guard = self.lock()?;
        let mut exercises: Vec<Exercise> = guard
            .exercises
            .values()
            .filter(|e| e.day_id == day_id)
            .cloned()
            .collect();
        exercises.sort_by_key(|e| (e.order, e.id));
        Ok(exercises)
    }

    async fn get_exercise(&self, id: ExerciseId) -> Result<Option<Exercise>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.exercises.get(&id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn insert_session(
        &self,
        session: NewSessionRecord,
    ) -> Result<WorkoutSession, StorageError> {
        let mut guard = self.lock()?;
        let id = SessionId::new(guard.allocate());
        let stored = WorkoutSession {
            id,
            day_id: session.day_id,
            status: session.status,
            started_at: session.started_at,
            completed_at: None,
        };
        guard.sessions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.sessions.get(&id).cloned())
    }

    async fn find_in_progress(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Option<WorkoutSession>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .sessions
            .values()
            .find(|s| s.day_id == day_id && s.is_in_progress())
            .cloned())
    }

    async fn update_session(
        &self,
        id: SessionId,
        update: &SessionUpdate,
    ) -> Result<WorkoutSession, StorageError> {
        let mut guard = self.lock()?;
        let session = guard.sessions.get_mut(&id).ok_or(StorageError::NotFound)?;
        session.apply(update);
        Ok(session.clone())
    }

    async fn sessions_for_day(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Vec<WorkoutSession>, StorageError> {
        let guard = self.lock()?;
        let mut sessions: Vec<WorkoutSession> = guard
            .sessions
            .values()
            .filter(|s| s.day_id == day_id)
            .cloned()
            .collect();
        // None sorts lowest, so reversing puts unfinished sessions last.
        sessions.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(sessions)
    }
}

#[async_trait]
impl SetRepository for InMemoryRepository {
    async fn find_set(&self, key: SetKey) -> Result<Option<ExerciseSet>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.sets.values().find(|s| s.key() == key).cloned())
    }

    async fn insert_completed_set(
        &self,
        key: SetKey,
        entry: SetEntry,
        completed_at: DateTime<Utc>,
    ) -> Result<ExerciseSet, StorageError> {
        let mut guard = self.lock()?;
        let id = SetId::new(guard.allocate());
        let set = ExerciseSet {
            id,
            session_id: key.session_id,
            exercise_id: key.exercise_id,
            set_number: key.set_number,
            weight: entry.weight,
            reps: entry.reps,
            completed: true,
            completed_at: Some(completed_at),
            notes: None,
        };
        guard.sets.insert(id, set.clone());
        Ok(set)
    }

    async fn complete_existing_set(
        &self,
        id: SetId,
        entry: SetEntry,
        completed_at: DateTime<Utc>,
    ) -> Result<ExerciseSet, StorageError> {
        let mut guard = self.lock()?;
        let set = guard.sets.get_mut(&id).ok_or(StorageError::NotFound)?;
        set.complete(entry, completed_at);
        Ok(set.clone())
    }

    async fn sets_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ExerciseSet>, StorageError> {
        let guard = self.lock()?;
        let mut sets: Vec<ExerciseSet> = guard
            .sets
            .values()
            .filter(|s| s.session_id == session_id)
            .cloned()
            .collect();
        sets.sort_by_key(|s| (s.set_number, s.id));
        Ok(sets)
    }

    async fn last_performance(
        &self,
        exercise_id: ExerciseId,
    ) -> Result<Option<LastPerformance>, StorageError> {
        let guard = self.lock()?;
        let sessions: Vec<WorkoutSession> = guard.sessions.values().cloned().collect();
        Ok(last_performance(exercise_id, &sessions, guard.sets.values()))
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, StorageError> {
        let mut guard = self.lock()?;
        let todo = todo.assign_id(TodoId::new(guard.allocate()));
        guard.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.todos.get(&id).cloned())
    }

    async fn list_todos(&self, query: TodoQuery) -> Result<Vec<Todo>, StorageError> {
        let guard = self.lock()?;
        Ok(query.apply(guard.todos.values()))
    }

    async fn save_todo(&self, todo: &Todo) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        let slot = guard.todos.get_mut(&todo.id).ok_or(StorageError::NotFound)?;
        *slot = todo.clone();
        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<bool, StorageError> {
        let mut guard = self.lock()?;
        Ok(guard.todos.remove(&id).is_some())
    }

    async fn delete_completed(&self) -> Result<u64, StorageError> {
        let mut guard = self.lock()?;
        let before = guard.todos.len();
        guard.todos.retain(|_, todo| !todo.completed);
        Ok((before - guard.todos.len()) as u64)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub programs: Arc<dyn ProgramRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub sets: Arc<dyn SetRepository>,
    pub todos: Arc<dyn TodoRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let programs: Arc<dyn ProgramRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo.clone());
        let sets: Arc<dyn SetRepository> = Arc::new(repo.clone());
        let todos: Arc<dyn TodoRepository> = Arc::new(repo);
        Self {
            programs,
            sessions,
            sets,
            todos,
        }
    }
}
