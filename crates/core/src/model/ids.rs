use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

row_id!(
    /// Unique identifier for a training program
    ProgramId
);
row_id!(
    /// Unique identifier for a training day within a program
    WorkoutDayId
);
row_id!(
    /// Unique identifier for a prescribed exercise
    ExerciseId
);
row_id!(
    /// Unique identifier for a workout session
    SessionId
);
row_id!(
    /// Unique identifier for a logged set row
    SetId
);
row_id!(
    /// Unique identifier for a todo item
    TodoId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_display() {
        let id = SessionId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "SessionId(42)");
    }

    #[test]
    fn workout_day_id_from_str() {
        let id: WorkoutDayId = "123".parse().unwrap();
        assert_eq!(id, WorkoutDayId::new(123));
    }

    #[test]
    fn todo_id_from_str_invalid() {
        let err = "not-a-number".parse::<TodoId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse TodoId from string");
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&ExerciseId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn id_roundtrip() {
        let original = SetId::new(99);
        let parsed: SetId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }
}
