use chrono::NaiveDate;
use workout_core::model::{Priority, TodoDraft};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddTodoFieldError {
    EmptyTitle,
    InvalidDueDate,
}

impl AddTodoFieldError {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyTitle => "Title is required",
            Self::InvalidDueDate => "Due date must look like 2024-05-01",
        }
    }
}

/// Raw inputs of the add-todo form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddTodoForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// `YYYY-MM-DD` as produced by a date input; empty means no due date.
    pub due_date: String,
}

impl AddTodoForm {
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Trimmed draft ready for `TodoService::create`.
    ///
    /// # Errors
    ///
    /// Returns `AddTodoFieldError` for a blank title or an unparseable date.
    pub fn to_draft(&self) -> Result<TodoDraft, AddTodoFieldError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AddTodoFieldError::EmptyTitle);
        }

        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_owned);

        let due = self.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due, "%Y-%m-%d")
                    .map_err(|_| AddTodoFieldError::InvalidDueDate)?,
            )
        };

        Ok(TodoDraft {
            title: title.to_owned(),
            description,
            priority: self.priority,
            due_date,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
