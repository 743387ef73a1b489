use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Versioned schema statements. Each version is applied once, in a single
/// transaction, and recorded in `schema_migrations`.
const MIGRATIONS: &[(i64, &[&str])] = &[(1, SCHEMA_V1)];

const SCHEMA_V1: &[&str] = &[
    r"
        CREATE TABLE IF NOT EXISTS programs (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            duration TEXT
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS workout_days (
            id INTEGER PRIMARY KEY,
            program_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            focus TEXT,
            notes TEXT,
            day_order INTEGER NOT NULL CHECK (day_order >= 0),
            FOREIGN KEY (program_id) REFERENCES programs(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY,
            day_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            sets INTEGER NOT NULL CHECK (sets >= 0),
            reps TEXT NOT NULL,
            exercise_order INTEGER NOT NULL CHECK (exercise_order >= 0),
            muscles_worked TEXT,
            how_to_do TEXT,
            FOREIGN KEY (day_id) REFERENCES workout_days(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS workout_sessions (
            id INTEGER PRIMARY KEY,
            day_id INTEGER NOT NULL,
            status TEXT NOT NULL CHECK (status IN ('not_started', 'in_progress', 'completed')),
            started_at TEXT NOT NULL,
            completed_at TEXT,
            FOREIGN KEY (day_id) REFERENCES workout_days(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS exercise_sets (
            id INTEGER PRIMARY KEY,
            session_id INTEGER NOT NULL,
            exercise_id INTEGER NOT NULL,
            set_number INTEGER NOT NULL CHECK (set_number >= 1),
            weight REAL,
            reps INTEGER CHECK (reps >= 0),
            completed INTEGER NOT NULL DEFAULT 0,
            completed_at TEXT,
            notes TEXT,
            FOREIGN KEY (session_id) REFERENCES workout_sessions(id) ON DELETE CASCADE,
            FOREIGN KEY (exercise_id) REFERENCES exercises(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            priority TEXT NOT NULL CHECK (priority IN ('low', 'medium', 'high')),
            due_date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_workout_days_program_order
            ON workout_days (program_id, day_order, id);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_exercises_day_order
            ON exercises (day_id, exercise_order, id);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_workout_sessions_day_status
            ON workout_sessions (day_id, status);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_exercise_sets_session_exercise_number
            ON exercise_sets (session_id, exercise_id, set_number);
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_exercise_sets_exercise
            ON exercise_sets (exercise_id, completed);
    ",
];

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    for (version, statements) in MIGRATIONS {
        if is_applied(pool, *version).await? {
            continue;
        }

        let mut tx = pool.begin().await?;
        for statement in *statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(*version)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(version, "applied schema migration");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
