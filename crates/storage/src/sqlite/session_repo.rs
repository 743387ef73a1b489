use workout_core::model::{SessionId, SessionUpdate, WorkoutDayId, WorkoutSession};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_session_row, session_id_from_i64};
use crate::repository::{NewSessionRecord, SessionRepository, StorageError};

const SESSION_COLUMNS: &str = "id, day_id, status, started_at, completed_at";

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn insert_session(
        &self,
        session: NewSessionRecord,
    ) -> Result<WorkoutSession, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO workout_sessions (day_id, status, started_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(id_to_i64("day_id", session.day_id.value())?)
        .bind(session.status.as_str())
        .bind(session.started_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(WorkoutSession {
            id: session_id_from_i64(res.last_insert_rowid())?,
            day_id: session.day_id,
            status: session.status,
            started_at: session.started_at,
            completed_at: None,
        })
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<WorkoutSession>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = ?1"
        ))
        .bind(id_to_i64("session_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn find_in_progress(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Option<WorkoutSession>, StorageError> {
        let row = sqlx::query(&format!(
            r"
            SELECT {SESSION_COLUMNS}
            FROM workout_sessions
            WHERE day_id = ?1 AND status = 'in_progress'
            ORDER BY id ASC
            LIMIT 1
            "
        ))
        .bind(id_to_i64("day_id", day_id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn update_session(
        &self,
        id: SessionId,
        update: &SessionUpdate,
    ) -> Result<WorkoutSession, StorageError> {
        let res = sqlx::query(
            r"
            UPDATE workout_sessions
            SET status = ?2,
                started_at = COALESCE(?3, started_at),
                completed_at = COALESCE(?4, completed_at)
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("session_id", id.value())?)
        .bind(update.status.as_str())
        .bind(update.started_at)
        .bind(update.completed_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_session(id).await?.ok_or(StorageError::NotFound)
    }

    async fn sessions_for_day(
        &self,
        day_id: WorkoutDayId,
    ) -> Result<Vec<WorkoutSession>, StorageError> {
        // DESC puts NULL completed_at last in SQLite.
        let rows = sqlx::query(&format!(
            r"
            SELECT {SESSION_COLUMNS}
            FROM workout_sessions
            WHERE day_id = ?1
            ORDER BY completed_at DESC, id DESC
            "
        ))
        .bind(id_to_i64("day_id", day_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_session_row).collect()
    }
}
