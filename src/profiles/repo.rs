use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::profiles::repo_types::{ProfileRow, UserProfile};

/// Username-keyed profile storage. Profiles are immutable once registered.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn register(&self, username: &str, profile: UserProfile) -> Result<(), StoreError>;
    async fn lookup(&self, username: &str) -> Result<Option<UserProfile>, StoreError>;
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn register(&self, username: &str, profile: UserProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(username) {
            return Err(StoreError::AlreadyExists(username.to_string()));
        }
        profiles.insert(username.to_string(), profile);
        Ok(())
    }

    async fn lookup(&self, username: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.read().await.get(username).copied())
    }
}

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn register(&self, username: &str, profile: UserProfile) -> Result<(), StoreError> {
        let inserted = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO profiles (username, age, gender, goal, experience, equipment)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (username) DO NOTHING
            RETURNING username
            "#,
        )
        .bind(username)
        .bind(i16::from(profile.age))
        .bind(profile.gender.as_str())
        .bind(profile.goal.as_str())
        .bind(profile.experience.as_str())
        .bind(profile.equipment.as_str())
        .fetch_optional(&self.db)
        .await?;

        match inserted {
            Some(_) => Ok(()),
            None => Err(StoreError::AlreadyExists(username.to_string())),
        }
    }

    async fn lookup(&self, username: &str) -> Result<Option<UserProfile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT age, gender, goal, experience, equipment
            FROM profiles
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        row.map(UserProfile::try_from)
            .transpose()
            .map_err(StoreError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::repo_types::{Equipment, Experience, Gender, Goal};

    fn alice() -> UserProfile {
        UserProfile {
            age: 25,
            gender: Gender::Female,
            goal: Goal::WeightLoss,
            experience: Experience::Beginner,
            equipment: Equipment::None,
        }
    }

    #[tokio::test]
    async fn register_then_lookup() {
        let store = InMemoryProfileStore::new();
        store.register("alice", alice()).await.expect("register");
        assert_eq!(store.lookup("alice").await.unwrap(), Some(alice()));
        assert_eq!(store.lookup("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn re_registration_is_rejected_and_keeps_original() {
        let store = InMemoryProfileStore::new();
        store.register("alice", alice()).await.expect("register");

        let mut other = alice();
        other.goal = Goal::Endurance;
        let err = store.register("alice", other).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(ref u) if u == "alice"));
        assert_eq!(store.lookup("alice").await.unwrap(), Some(alice()));
    }
}
