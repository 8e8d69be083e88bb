// In-process repositories with the same semantics as the PostgreSQL ones
// Ids count up from 1 like a BIGSERIAL column

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::repositories::{
    NewUser, RepositoryError, StampRepository, User, UserRepository,
};
use crate::domain::stamp::{NewStamp, Stamp};
use crate::domain::user::Username;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.name == user.name) {
            return Err(RepositoryError::Conflict(format!(
                "name {} already exists",
                user.name
            )));
        }

        let user = User {
            id: users.len() as i64 + 1,
            name: user.name,
            password_hash: user.password_hash,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.name == name).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryStampRepository {
    stamps: RwLock<Vec<Stamp>>,
}

impl InMemoryStampRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StampRepository for InMemoryStampRepository {
    async fn create(&self, stamp: NewStamp) -> Result<Stamp, RepositoryError> {
        let mut stamps = self.stamps.write().await;
        // created_at never goes backwards in insertion order
        let created_at = stamps
            .last()
            .map_or_else(Utc::now, |last| last.created_at.max(Utc::now()));
        let stamp = Stamp::from_new(stamps.len() as i64 + 1, stamp, created_at);
        stamps.push(stamp.clone());
        Ok(stamp)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Stamp>, RepositoryError> {
        let stamps = self.stamps.read().await;
        let mut newest: Vec<Stamp> = stamps.clone();
        newest.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        newest.truncate(limit.max(0) as usize);
        Ok(newest)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Stamp>, RepositoryError> {
        let stamps = self.stamps.read().await;
        Ok(stamps.iter().find(|s| s.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stamp::{HexColor, Language, StampEffect};

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: Username::new(name).unwrap(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_stamp(text: &str) -> NewStamp {
        NewStamp::new(
            text,
            Language::Japanese,
            HexColor::new("#ffffff").unwrap(),
            HexColor::new("#000000").unwrap(),
            StampEffect::None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn user_ids_count_up() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.create(new_user("alice")).await.unwrap();
        let bob = repo.create(new_user("bob")).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(bob));
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice")).await.unwrap();

        let err = repo.create(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_name_misses_unknown() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice")).await.unwrap();

        let missing = repo.find_by_name(&Username::new("carol").unwrap()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let repo = InMemoryStampRepository::new();
        for i in 0..5 {
            repo.create(new_stamp(&format!("stamp {}", i))).await.unwrap();
        }

        let recent = repo.recent(3).await.unwrap();
        let ids: Vec<i64> = recent.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[tokio::test]
    async fn recent_with_zero_limit_is_empty() {
        let repo = InMemoryStampRepository::new();
        repo.create(new_stamp("only")).await.unwrap();

        assert!(repo.recent(0).await.unwrap().is_empty());
    }
}
