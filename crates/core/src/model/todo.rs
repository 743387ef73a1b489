use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::TodoId;
use crate::model::program::non_blank;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TodoError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("invalid {field} value: {raw}")]
    InvalidValue { field: &'static str, raw: String },
}

//
// ─── PRIORITY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank: low < medium < high.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(TodoError::InvalidValue {
                field: "priority",
                raw: other.to_owned(),
            }),
        }
    }
}

//
// ─── TODO ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Apply an already validated patch, stamping `updated_at`.
    pub fn apply(&mut self, patch: &TodoPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description = non_blank(Some(description.clone()));
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Some(now);
    }
}

/// User input for a new todo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl TodoDraft {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `TodoError::EmptyTitle` when the trimmed title is empty.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewTodo, TodoError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        Ok(NewTodo {
            title,
            description: non_blank(self.description),
            priority: self.priority,
            due_date: self.due_date,
            created_at: now,
        })
    }
}

/// Validated todo ready for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    #[must_use]
    pub fn assign_id(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: false,
            priority: self.priority,
            due_date: self.due_date,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Partial todo update; `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

impl TodoPatch {
    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// # Errors
    ///
    /// Returns `TodoError::EmptyTitle` when a provided title trims to empty.
    pub fn validate(self) -> Result<Self, TodoError> {
        let title = match self.title {
            Some(title) => {
                let trimmed = title.trim().to_owned();
                if trimmed.is_empty() {
                    return Err(TodoError::EmptyTitle);
                }
                Some(trimmed)
            }
            None => None,
        };
        Ok(Self { title, ..self })
    }
}

//
// ─── QUERY ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    #[must_use]
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoSortBy {
    #[default]
    CreatedAt,
    DueDate,
    Priority,
}

impl TodoSortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::DueDate => "due_date",
            Self::Priority => "priority",
        }
    }
}

impl FromStr for TodoSortBy {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "due_date" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            other => Err(TodoError::InvalidValue {
                field: "sort_by",
                raw: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Filter and ordering for listing todos. Defaults: all, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoQuery {
    pub filter: TodoFilter,
    pub sort_by: TodoSortBy,
    pub sort_order: SortOrder,
}

impl TodoQuery {
    #[must_use]
    pub fn filtered(filter: TodoFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Ordering of two todos under this query.
    ///
    /// A missing due date sorts before any date when ascending, matching SQL
    /// NULL ordering. Ties fall back to id in the same direction.
    #[must_use]
    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        let primary = match self.sort_by {
            TodoSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            TodoSortBy::DueDate => a.due_date.cmp(&b.due_date),
            TodoSortBy::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Filter and sort an in-memory collection.
    #[must_use]
    pub fn apply<'a>(&self, todos: impl IntoIterator<Item = &'a Todo>) -> Vec<Todo> {
        let mut out: Vec<Todo> = todos
            .into_iter()
            .filter(|todo| self.filter.matches(todo))
            .cloned()
            .collect();
        out.sort_by(|a, b| self.compare(a, b));
        out
    }
}

/// Remaining/total counts shown under the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    pub remaining: usize,
    pub total: usize,
}

impl TodoStats {
    #[must_use]
    pub fn from_todos(todos: &[Todo]) -> Self {
        Self {
            remaining: todos.iter().filter(|t| !t.completed).count(),
            total: todos.len(),
        }
    }

    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.remaining < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn todo(id: u64, completed: bool, priority: Priority, due: Option<NaiveDate>) -> Todo {
        Todo {
            id: TodoId::new(id),
            title: format!("todo {id}"),
            description: None,
            completed,
            priority,
            due_date: due,
            created_at: fixed_now() + Duration::minutes(i64::try_from(id).unwrap()),
            updated_at: None,
        }
    }

    fn ids(todos: &[Todo]) -> Vec<u64> {
        todos.iter().map(|t| t.id.value()).collect()
    }

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, day)
    }

    #[test]
    fn draft_requires_title() {
        let err = TodoDraft::titled("   ").validate(fixed_now()).unwrap_err();
        assert_eq!(err, TodoError::EmptyTitle);

        let new = TodoDraft {
            title: " Buy mat ".into(),
            description: Some(String::new()),
            ..TodoDraft::default()
        }
        .validate(fixed_now())
        .unwrap();
        assert_eq!(new.title, "Buy mat");
        assert_eq!(new.description, None);
        assert_eq!(new.priority, Priority::Medium);
    }

    #[test]
    fn filters_by_completion() {
        let todos = vec![
            todo(1, false, Priority::Low, None),
            todo(2, true, Priority::Low, None),
            todo(3, false, Priority::Low, None),
        ];

        let active = TodoQuery::filtered(TodoFilter::Active).apply(&todos);
        assert!(active.iter().all(|t| !t.completed));
        assert_eq!(active.len(), 2);

        let completed = TodoQuery::filtered(TodoFilter::Completed).apply(&todos);
        assert_eq!(ids(&completed), vec![2]);

        let all = TodoQuery::filtered(TodoFilter::All).apply(&todos);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn default_query_is_newest_first() {
        let todos = vec![
            todo(1, false, Priority::Low, None),
            todo(2, false, Priority::Low, None),
            todo(3, false, Priority::Low, None),
        ];
        assert_eq!(ids(&TodoQuery::default().apply(&todos)), vec![3, 2, 1]);
    }

    #[test]
    fn priority_sorts_by_rank_not_name() {
        let todos = vec![
            todo(1, false, Priority::Medium, None),
            todo(2, false, Priority::High, None),
            todo(3, false, Priority::Low, None),
        ];
        let query = TodoQuery {
            sort_by: TodoSortBy::Priority,
            sort_order: SortOrder::Asc,
            ..TodoQuery::default()
        };
        assert_eq!(ids(&query.apply(&todos)), vec![3, 1, 2]);
    }

    #[test]
    fn missing_due_dates_sort_first_ascending() {
        let todos = vec![
            todo(1, false, Priority::Low, date(10)),
            todo(2, false, Priority::Low, None),
            todo(3, false, Priority::Low, date(3)),
        ];
        let query = TodoQuery {
            sort_by: TodoSortBy::DueDate,
            sort_order: SortOrder::Asc,
            ..TodoQuery::default()
        };
        assert_eq!(ids(&query.apply(&todos)), vec![2, 3, 1]);
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut t = todo(1, false, Priority::Low, None);
        let patch = TodoPatch {
            priority: Some(Priority::High),
            ..TodoPatch::default()
        }
        .validate()
        .unwrap();
        t.apply(&patch, fixed_now());

        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.title, "todo 1");
        assert_eq!(t.updated_at, Some(fixed_now()));
        assert!(TodoPatch {
            title: Some(" ".into()),
            ..TodoPatch::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn stats_count_remaining() {
        let todos = vec![
            todo(1, false, Priority::Low, None),
            todo(2, true, Priority::Low, None),
        ];
        let stats = TodoStats::from_todos(&todos);
        assert_eq!(stats.remaining, 1);
        assert_eq!(stats.total, 2);
        assert!(stats.has_completed());
    }
}
