use workout_core::model::{
    Exercise, ExerciseDraft, ExerciseId, Program, ProgramDraft, ProgramId, WorkoutDay,
    WorkoutDayDraft, WorkoutDayId,
};

use super::SqliteRepository;
use super::mapping::{
    conn, day_id_from_i64, exercise_id_from_i64, id_to_i64, map_day_row, map_exercise_row,
    map_program_row, program_id_from_i64,
};
use crate::repository::{ProgramRepository, StorageError};

const PROGRAM_COLUMNS: &str = "id, name, description, duration";
const DAY_COLUMNS: &str = "id, program_id, name, focus, notes, day_order";
const EXERCISE_COLUMNS: &str =
    "id, day_id, name, description, sets, reps, exercise_order, muscles_worked, how_to_do";

#[async_trait::async_trait]
impl ProgramRepository for SqliteRepository {
    async fn insert_program(&self, program: ProgramDraft) -> Result<ProgramId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO programs (name, description, duration)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(program.name)
        .bind(program.description)
        .bind(program.duration)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        program_id_from_i64(res.last_insert_rowid())
    }

    async fn insert_day(&self, day: WorkoutDayDraft) -> Result<WorkoutDayId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO workout_days (program_id, name, focus, notes, day_order)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_to_i64("program_id", day.program_id.value())?)
        .bind(day.name)
        .bind(day.focus)
        .bind(day.notes)
        .bind(i64::from(day.order))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        day_id_from_i64(res.last_insert_rowid())
    }

    async fn insert_exercise(&self, exercise: ExerciseDraft) -> Result<ExerciseId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO exercises (
                day_id, name, description, sets, reps, exercise_order, muscles_worked, how_to_do
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(id_to_i64("day_id", exercise.day_id.value())?)
        .bind(exercise.name)
        .bind(exercise.description)
        .bind(i64::from(exercise.sets))
        .bind(exercise.reps)
        .bind(i64::from(exercise.order))
        .bind(exercise.muscles_worked)
        .bind(exercise.how_to_do)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        exercise_id_from_i64(res.last_insert_rowid())
    }

    async fn list_programs(&self) -> Result<Vec<Program>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_program_row).collect()
    }

    async fn get_program(&self, id: ProgramId) -> Result<Option<Program>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = ?1"
        ))
        .bind(id_to_i64("program_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_program_row).transpose()
    }

    async fn find_program_by_name(&self, name: &str) -> Result<Option<Program>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE name = ?1 ORDER BY id ASC LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_program_row).transpose()
    }

    async fn list_days(&self, program_id: ProgramId) -> Result<Vec<WorkoutDay>, StorageError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {DAY_COLUMNS}
            FROM workout_days
            WHERE program_id = ?1
            ORDER BY day_order ASC, id ASC
            "
        ))
        .bind(id_to_i64("program_id", program_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_day_row).collect()
    }

    async fn get_day(&self, id: WorkoutDayId) -> Result<Option<WorkoutDay>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {DAY_COLUMNS} FROM workout_days WHERE id = ?1"
        ))
        .bind(id_to_i64("day_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_day_row).transpose()
    }

    async fn list_exercises(&self, day_id: WorkoutDayId) -> Result<Vec<Exercise>, StorageError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {EXERCISE_COLUMNS}
            FROM exercises
            WHERE day_id = ?1
            ORDER BY exercise_order ASC, id ASC
            "
        ))
        .bind(id_to_i64("day_id", day_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_exercise_row).collect()
    }

    async fn get_exercise(&self, id: ExerciseId) -> Result<Option<Exercise>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?1"
        ))
        .bind(id_to_i64("exercise_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_exercise_row).transpose()
    }
}
