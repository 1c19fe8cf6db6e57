use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One completed exercise. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LogEntry {
    pub timestamp: String,    // local time, YYYY-MM-DD HH:MM:SS
    pub exercise: String,     // display name from the exercise vocabulary
    pub reps_or_time: String, // free text, e.g. "10 reps" or "30 sec"
}

/// Chart row: how often an exercise was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseCount {
    pub exercise: String,
    pub count: usize,
}
