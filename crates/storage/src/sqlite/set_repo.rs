use chrono::{DateTime, Utc};
use workout_core::model::{ExerciseId, ExerciseSet, SessionId, SetEntry, SetId, SetKey};
use workout_core::progress::LastPerformance;

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_set_row, set_id_from_i64};
use crate::repository::{SetRepository, StorageError};

const SET_COLUMNS: &str =
    "id, session_id, exercise_id, set_number, weight, reps, completed, completed_at, notes";

#[async_trait::async_trait]
impl SetRepository for SqliteRepository {
    async fn find_set(&self, key: SetKey) -> Result<Option<ExerciseSet>, StorageError> {
        let row = sqlx::query(&format!(
            r"
            SELECT {SET_COLUMNS}
            FROM exercise_sets
            WHERE session_id = ?1 AND exercise_id = ?2 AND set_number = ?3
            ORDER BY id ASC
            LIMIT 1
            "
        ))
        .bind(id_to_i64("session_id", key.session_id.value())?)
        .bind(id_to_i64("exercise_id", key.exercise_id.value())?)
        .bind(i64::from(key.set_number))
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_set_row).transpose()
    }

    async fn insert_completed_set(
        &self,
        key: SetKey,
        entry: SetEntry,
        completed_at: DateTime<Utc>,
    ) -> Result<ExerciseSet, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO exercise_sets (
                session_id, exercise_id, set_number, weight, reps, completed, completed_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)
            ",
        )
        .bind(id_to_i64("session_id", key.session_id.value())?)
        .bind(id_to_i64("exercise_id", key.exercise_id.value())?)
        .bind(i64::from(key.set_number))
        .bind(entry.weight)
        .bind(entry.reps.map(i64::from))
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(ExerciseSet {
            id: set_id_from_i64(res.last_insert_rowid())?,
            session_id: key.session_id,
            exercise_id: key.exercise_id,
            set_number: key.set_number,
            weight: entry.weight,
            reps: entry.reps,
            completed: true,
            completed_at: Some(completed_at),
            notes: None,
        })
    }

    async fn complete_existing_set(
        &self,
        id: SetId,
        entry: SetEntry,
        completed_at: DateTime<Utc>,
    ) -> Result<ExerciseSet, StorageError> {
        let row = sqlx::query(&format!(
            r"
            UPDATE exercise_sets
            SET weight = ?2, reps = ?3, completed = 1, completed_at = ?4
            WHERE id = ?1
            RETURNING {SET_COLUMNS}
            "
        ))
        .bind(id_to_i64("set_id", id.value())?)
        .bind(entry.weight)
        .bind(entry.reps.map(i64::from))
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_set_row(&row)
    }

    async fn sets_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ExerciseSet>, StorageError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {SET_COLUMNS}
            FROM exercise_sets
            WHERE session_id = ?1
            ORDER BY set_number ASC, id ASC
            "
        ))
        .bind(id_to_i64("session_id", session_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_set_row).collect()
    }

    async fn last_performance(
        &self,
        exercise_id: ExerciseId,
    ) -> Result<Option<LastPerformance>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT s.id, s.session_id, s.exercise_id, s.set_number, s.weight, s.reps,
                   s.completed, s.completed_at, s.notes
            FROM exercise_sets s
            JOIN workout_sessions ws ON ws.id = s.session_id
            WHERE s.exercise_id = ?1
              AND s.completed = 1
              AND ws.status = 'completed'
            ORDER BY ws.completed_at DESC, s.completed_at DESC, s.id DESC
            LIMIT 1
            ",
        )
        .bind(id_to_i64("exercise_id", exercise_id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        Ok(row
            .as_ref()
            .map(map_set_row)
            .transpose()?
            .as_ref()
            .map(LastPerformance::from))
    }
}
