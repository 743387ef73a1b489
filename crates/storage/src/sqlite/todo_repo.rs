use workout_core::model::{NewTodo, SortOrder, Todo, TodoFilter, TodoId, TodoQuery, TodoSortBy};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_todo_row, todo_id_from_i64};
use crate::repository::{StorageError, TodoRepository};

const TODO_COLUMNS: &str =
    "id, title, description, completed, priority, due_date, created_at, updated_at";

fn where_clause(filter: TodoFilter) -> &'static str {
    match filter {
        TodoFilter::All => "",
        TodoFilter::Active => "WHERE completed = 0",
        TodoFilter::Completed => "WHERE completed = 1",
    }
}

/// Sort key expression. Priority is ranked rather than compared as text.
fn sort_expr(sort_by: TodoSortBy) -> &'static str {
    match sort_by {
        TodoSortBy::CreatedAt => "created_at",
        TodoSortBy::DueDate => "due_date",
        TodoSortBy::Priority => {
            "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 WHEN 'high' THEN 2 END"
        }
    }
}

fn direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

fn list_sql(query: TodoQuery) -> String {
    let dir = direction(query.sort_order);
    format!(
        "SELECT {TODO_COLUMNS} FROM todos {} ORDER BY {} {dir}, id {dir}",
        where_clause(query.filter),
        sort_expr(query.sort_by),
    )
}

#[async_trait::async_trait]
impl TodoRepository for SqliteRepository {
    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO todos (title, description, completed, priority, due_date, created_at)
            VALUES (?1, ?2, 0, ?3, ?4, ?5)
            ",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.priority.as_str())
        .bind(todo.due_date)
        .bind(todo.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        let id = todo_id_from_i64(res.last_insert_rowid())?;
        Ok(todo.assign_id(id))
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>, StorageError> {
        let row = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"))
            .bind(id_to_i64("todo_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_todo_row).transpose()
    }

    async fn list_todos(&self, query: TodoQuery) -> Result<Vec<Todo>, StorageError> {
        let rows = sqlx::query(&list_sql(query))
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_todo_row).collect()
    }

    async fn save_todo(&self, todo: &Todo) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE todos
            SET title = ?2,
                description = ?3,
                completed = ?4,
                priority = ?5,
                due_date = ?6,
                updated_at = ?7
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("todo_id", todo.id.value())?)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(i64::from(todo.completed))
        .bind(todo.priority.as_str())
        .bind(todo.due_date)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<bool, StorageError> {
        let res = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id_to_i64("todo_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_completed(&self) -> Result<u64, StorageError> {
        let res = sqlx::query("DELETE FROM todos WHERE completed = 1")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_sql_ranks_priority_and_breaks_ties_by_id() {
        let sql = list_sql(TodoQuery {
            filter: TodoFilter::Active,
            sort_by: TodoSortBy::Priority,
            sort_order: SortOrder::Asc,
        });
        assert!(sql.contains("WHERE completed = 0"));
        assert!(sql.contains("WHEN 'high' THEN 2 END ASC, id ASC"));
    }

    #[test]
    fn default_list_sql_is_newest_first() {
        let sql = list_sql(TodoQuery::default());
        assert!(sql.ends_with("ORDER BY created_at DESC, id DESC"));
        assert!(!sql.contains("WHERE"));
    }
}
