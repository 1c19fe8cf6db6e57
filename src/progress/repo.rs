use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::progress::repo_types::LogEntry;

/// Append-only per-user workout log.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Opens an empty log for a freshly registered user.
    async fn init_user(&self, username: &str) -> Result<(), StoreError>;
    async fn append(&self, username: &str, entry: LogEntry) -> Result<(), StoreError>;
    /// Entries in append order.
    async fn read(&self, username: &str) -> Result<Vec<LogEntry>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryProgressStore {
    logs: RwLock<HashMap<String, Vec<LogEntry>>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn init_user(&self, username: &str) -> Result<(), StoreError> {
        self.logs
            .write()
            .await
            .entry(username.to_string())
            .or_default();
        Ok(())
    }

    async fn append(&self, username: &str, entry: LogEntry) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        let log = logs
            .get_mut(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
        log.push(entry);
        Ok(())
    }

    async fn read(&self, username: &str) -> Result<Vec<LogEntry>, StoreError> {
        self.logs
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))
    }
}

#[derive(Clone)]
pub struct PgProgressStore {
    db: PgPool,
}

impl PgProgressStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    // the profiles row is the log's anchor; nothing to create
    async fn init_user(&self, _username: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append(&self, username: &str, entry: LogEntry) -> Result<(), StoreError> {
        let res = sqlx::query(
            r#"
            INSERT INTO workout_logs (username, logged_at, exercise, reps_or_time)
            SELECT username, $2, $3, $4
            FROM profiles
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(&entry.timestamp)
        .bind(&entry.exercise)
        .bind(&entry.reps_or_time)
        .execute(&self.db)
        .await?;

        if res.rows_affected() == 0 {
            return Err(StoreError::UnknownUser(username.to_string()));
        }
        Ok(())
    }

    async fn read(&self, username: &str) -> Result<Vec<LogEntry>, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM profiles WHERE username = $1)"#,
        )
        .bind(username)
        .fetch_one(&self.db)
        .await?;
        if !exists {
            return Err(StoreError::UnknownUser(username.to_string()));
        }

        let rows = sqlx::query_as::<_, LogEntry>(
            r#"
            SELECT logged_at AS timestamp, exercise, reps_or_time
            FROM workout_logs
            WHERE username = $1
            ORDER BY id ASC
            "#,
        )
        .bind(username)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(exercise: &str, reps: &str) -> LogEntry {
        LogEntry {
            timestamp: "2026-10-16 08:30:00".into(),
            exercise: exercise.into(),
            reps_or_time: reps.into(),
        }
    }

    #[tokio::test]
    async fn append_then_read_preserves_order() {
        let store = InMemoryProgressStore::new();
        store.init_user("alice").await.unwrap();
        store.append("alice", entry("Running", "20 min")).await.unwrap();
        store.append("alice", entry("Plank", "60 sec")).await.unwrap();

        let log = store.read("alice").await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], entry("Running", "20 min"));
        assert_eq!(log[1], entry("Plank", "60 sec"));
    }

    #[tokio::test]
    async fn init_user_does_not_truncate_existing_log() {
        let store = InMemoryProgressStore::new();
        store.init_user("alice").await.unwrap();
        store.append("alice", entry("Running", "20 min")).await.unwrap();
        store.init_user("alice").await.unwrap();
        assert_eq!(store.read("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_is_reported() {
        let store = InMemoryProgressStore::new();
        assert!(matches!(store.read("bob").await, Err(StoreError::UnknownUser(_))));
        assert!(matches!(
            store.append("bob", entry("Running", "1 km")).await,
            Err(StoreError::UnknownUser(_))
        ));
    }
}
