use workout_core::model::{
    Priority, SortOrder, Todo, TodoFilter, TodoId, TodoQuery, TodoSortBy, TodoStats,
};

use crate::vm::time_fmt::{format_date, format_day};

pub const SORT_OPTIONS: [(TodoSortBy, &str); 3] = [
    (TodoSortBy::CreatedAt, "Created Date"),
    (TodoSortBy::DueDate, "Due Date"),
    (TodoSortBy::Priority, "Priority"),
];

/// Screen state for the todo list controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
    pub filter: TodoFilter,
    pub sort_by: TodoSortBy,
    pub sort_order: SortOrder,
    pub adding: bool,
}

impl TodoListState {
    #[must_use]
    pub fn query(&self) -> TodoQuery {
        TodoQuery {
            filter: self.filter,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    pub fn set_sort_by(&mut self, sort_by: TodoSortBy) {
        self.sort_by = sort_by;
    }

    pub fn toggle_order(&mut self) {
        self.sort_order = self.sort_order.flipped();
    }

    pub fn toggle_adding(&mut self) {
        self.adding = !self.adding;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItemVm {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub due_label: Option<String>,
    pub created_label: String,
}

impl TodoItemVm {
    #[must_use]
    pub fn priority_class(&self) -> &'static str {
        match self.priority {
            Priority::High => "priority priority-high",
            Priority::Medium => "priority priority-medium",
            Priority::Low => "priority priority-low",
        }
    }
}

impl From<&Todo> for TodoItemVm {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            priority: todo.priority,
            due_label: todo.due_date.map(|d| format!("Due: {}", format_date(d))),
            created_label: format!("Created: {}", format_day(todo.created_at)),
        }
    }
}

#[must_use]
pub fn map_todo_items(todos: &[Todo]) -> Vec<TodoItemVm> {
    todos.iter().map(TodoItemVm::from).collect()
}

/// "2 of 4 tasks remaining", or nothing for an empty list.
#[must_use]
pub fn stats_label(stats: &TodoStats) -> Option<String> {
    (stats.total > 0).then(|| format!("{} of {} tasks remaining", stats.remaining, stats.total))
}
