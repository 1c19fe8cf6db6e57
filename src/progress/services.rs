use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::error::StoreError;
use crate::plans::catalog::Exercise;
use crate::progress::repo_types::{ExerciseCount, LogEntry};
use crate::state::AppState;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub const MAX_REPS_OR_TIME_LEN: usize = 100;

pub fn format_timestamp(at: OffsetDateTime) -> String {
    // the format only has numeric components, so formatting cannot fail
    at.format(TIMESTAMP_FORMAT).unwrap_or_default()
}

/// Local wall-clock time, falling back to UTC when the offset is unknown.
pub fn now_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

pub async fn log_workout(
    state: &AppState,
    username: &str,
    exercise: Exercise,
    reps_or_time: &str,
) -> Result<LogEntry, StoreError> {
    let entry = LogEntry {
        timestamp: now_timestamp(),
        exercise: exercise.name().to_string(),
        reps_or_time: reps_or_time.to_string(),
    };
    state.progress.append(username, entry.clone()).await?;
    Ok(entry)
}

/// Entry counts per exercise, in first-seen order.
pub fn exercise_counts(entries: &[LogEntry]) -> Vec<ExerciseCount> {
    let mut counts: Vec<ExerciseCount> = Vec::new();
    for e in entries {
        match counts.iter_mut().find(|c| c.exercise == e.exercise) {
            Some(c) => c.count += 1,
            None => counts.push(ExerciseCount {
                exercise: e.exercise.clone(),
                count: 1,
            }),
        }
    }
    counts
}
