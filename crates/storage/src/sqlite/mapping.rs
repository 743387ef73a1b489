use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use workout_core::model::{
    Exercise, ExerciseId, ExerciseSet, Priority, Program, ProgramId, SessionId, SessionStatus,
    SetId, Todo, TodoId, WorkoutDay, WorkoutDayId, WorkoutSession,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn get_u64(row: &SqliteRow, field: &'static str) -> Result<u64, StorageError> {
    i64_to_u64(field, row.try_get::<i64, _>(field).map_err(ser)?)
}

fn get_u32(row: &SqliteRow, field: &'static str) -> Result<u32, StorageError> {
    u32_from_i64(field, row.try_get::<i64, _>(field).map_err(ser)?)
}

pub(crate) fn program_id_from_i64(v: i64) -> Result<ProgramId, StorageError> {
    Ok(ProgramId::new(i64_to_u64("program_id", v)?))
}

pub(crate) fn day_id_from_i64(v: i64) -> Result<WorkoutDayId, StorageError> {
    Ok(WorkoutDayId::new(i64_to_u64("day_id", v)?))
}

pub(crate) fn exercise_id_from_i64(v: i64) -> Result<ExerciseId, StorageError> {
    Ok(ExerciseId::new(i64_to_u64("exercise_id", v)?))
}

pub(crate) fn session_id_from_i64(v: i64) -> Result<SessionId, StorageError> {
    Ok(SessionId::new(i64_to_u64("session_id", v)?))
}

pub(crate) fn set_id_from_i64(v: i64) -> Result<SetId, StorageError> {
    Ok(SetId::new(i64_to_u64("set_id", v)?))
}

pub(crate) fn todo_id_from_i64(v: i64) -> Result<TodoId, StorageError> {
    Ok(TodoId::new(i64_to_u64("todo_id", v)?))
}

pub(crate) fn map_program_row(row: &SqliteRow) -> Result<Program, StorageError> {
    Ok(Program {
        id: ProgramId::new(get_u64(row, "id")?),
        name: row.try_get("name").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        duration: row.try_get("duration").map_err(ser)?,
    })
}

pub(crate) fn map_day_row(row: &SqliteRow) -> Result<WorkoutDay, StorageError> {
    Ok(WorkoutDay {
        id: WorkoutDayId::new(get_u64(row, "id")?),
        program_id: ProgramId::new(get_u64(row, "program_id")?),
        name: row.try_get("name").map_err(ser)?,
        focus: row.try_get("focus").map_err(ser)?,
        notes: row.try_get("notes").map_err(ser)?,
        order: get_u32(row, "day_order")?,
    })
}

pub(crate) fn map_exercise_row(row: &SqliteRow) -> Result<Exercise, StorageError> {
    Ok(Exercise {
        id: ExerciseId::new(get_u64(row, "id")?),
        day_id: WorkoutDayId::new(get_u64(row, "day_id")?),
        name: row.try_get("name").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        sets: get_u32(row, "sets")?,
        reps: row.try_get("reps").map_err(ser)?,
        order: get_u32(row, "exercise_order")?,
        muscles_worked: row.try_get("muscles_worked").map_err(ser)?,
        how_to_do: row.try_get("how_to_do").map_err(ser)?,
    })
}

pub(crate) fn map_session_row(row: &SqliteRow) -> Result<WorkoutSession, StorageError> {
    let status: String = row.try_get("status").map_err(ser)?;
    Ok(WorkoutSession {
        id: SessionId::new(get_u64(row, "id")?),
        day_id: WorkoutDayId::new(get_u64(row, "day_id")?),
        status: status.parse::<SessionStatus>().map_err(ser)?,
        started_at: row.try_get("started_at").map_err(ser)?,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}

pub(crate) fn map_set_row(row: &SqliteRow) -> Result<ExerciseSet, StorageError> {
    let reps = row
        .try_get::<Option<i64>, _>("reps")
        .map_err(ser)?
        .map(|v| u32_from_i64("reps", v))
        .transpose()?;
    Ok(ExerciseSet {
        id: SetId::new(get_u64(row, "id")?),
        session_id: SessionId::new(get_u64(row, "session_id")?),
        exercise_id: ExerciseId::new(get_u64(row, "exercise_id")?),
        set_number: get_u32(row, "set_number")?,
        weight: row.try_get("weight").map_err(ser)?,
        reps,
        completed: row.try_get::<i64, _>("completed").map_err(ser)? != 0,
        completed_at: row.try_get("completed_at").map_err(ser)?,
        notes: row.try_get("notes").map_err(ser)?,
    })
}

pub(crate) fn map_todo_row(row: &SqliteRow) -> Result<Todo, StorageError> {
    let priority: String = row.try_get("priority").map_err(ser)?;
    let due_date: Option<NaiveDate> = row.try_get("due_date").map_err(ser)?;
    let updated_at: Option<DateTime<Utc>> = row.try_get("updated_at").map_err(ser)?;
    Ok(Todo {
        id: TodoId::new(get_u64(row, "id")?),
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        completed: row.try_get::<i64, _>("completed").map_err(ser)? != 0,
        priority: priority.parse::<Priority>().map_err(ser)?,
        due_date,
        created_at: row.try_get("created_at").map_err(ser)?,
        updated_at,
    })
}
