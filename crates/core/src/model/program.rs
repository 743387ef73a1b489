use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ProgramId, WorkoutDayId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgramError {
    #[error("program name cannot be empty")]
    EmptyName,

    #[error("workout day name cannot be empty")]
    EmptyDayName,
}

//
// ─── PROGRAM ───────────────────────────────────────────────────────────────────
//

/// A named multi-week training plan grouping workout days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub description: Option<String>,
    /// Free-form length label such as "6 weeks".
    pub duration: Option<String>,
}

/// Unsaved program, validated before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDraft {
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<String>,
}

impl ProgramDraft {
    /// # Errors
    ///
    /// Returns `ProgramError::EmptyName` if the trimmed name is empty.
    pub fn validate(self) -> Result<Self, ProgramError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ProgramError::EmptyName);
        }
        Ok(Self {
            name,
            description: non_blank(self.description),
            duration: non_blank(self.duration),
        })
    }
}

//
// ─── WORKOUT DAY ───────────────────────────────────────────────────────────────
//

/// One training day template within a program.
///
/// `order` drives display sequencing. It is expected to be unique within a
/// program, but nothing enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub id: WorkoutDayId,
    pub program_id: ProgramId,
    pub name: String,
    pub focus: Option<String>,
    pub notes: Option<String>,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDayDraft {
    pub program_id: ProgramId,
    pub name: String,
    pub focus: Option<String>,
    pub notes: Option<String>,
    pub order: u32,
}

impl WorkoutDayDraft {
    /// # Errors
    ///
    /// Returns `ProgramError::EmptyDayName` if the trimmed name is empty.
    pub fn validate(self) -> Result<Self, ProgramError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ProgramError::EmptyDayName);
        }
        Ok(Self {
            name,
            focus: non_blank(self.focus),
            notes: non_blank(self.notes),
            ..self
        })
    }
}

/// Normalizes optional free text: whitespace-only values become `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}
