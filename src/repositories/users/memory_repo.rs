//! 메모리 기반 사용자 저장소
//!
//! 테스트와 MongoDB 없이 띄우는 로컬 개발 서버에서 사용합니다.
//! 하나의 쓰기 락 안에서 조회와 쓰기를 함께 수행하므로 MongoDB 구현과 같은 원자성을 가집니다.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;
use super::UserStore;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ObjectId, User>>, AppError> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("사용자 저장소 락이 손상되었습니다".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ObjectId, User>>, AppError> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("사용자 저장소 락이 손상되었습니다".to_string()))
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.read()?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let users = self.read()?;
        Ok(users.get(&object_id).cloned())
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.write()?;

        let conflict = users.values().any(|existing| {
            existing.email == user.email
                || (user.google_id.is_some() && existing.google_id == user.google_id)
        });
        if conflict {
            return Err(AppError::AlreadyExists(format!("이미 등록된 사용자입니다: {}", user.email)));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn upsert_external_identity(&self, email: &str, google_id: &str) -> Result<User, AppError> {
        let mut users = self.write()?;

        let matched = users
            .values()
            .find(|u| u.email == email)
            .or_else(|| users.values().find(|u| u.google_id.as_deref() == Some(google_id)))
            .and_then(|u| u.id);

        if let Some(id) = matched {
            let google_id_taken = users
                .values()
                .any(|u| u.id != Some(id) && u.google_id.as_deref() == Some(google_id));

            if let Some(user) = users.get_mut(&id) {
                if user.google_id.is_none() {
                    if google_id_taken {
                        return Err(AppError::AlreadyExists(format!(
                            "다른 사용자에게 연결된 Google 계정입니다: {}", email
                        )));
                    }
                    user.attach_google_id(google_id);
                }
                return Ok(user.clone());
            }
        }

        let mut user = User::new_external(email.to_string(), google_id.to_string());
        let now = DateTime::now();
        user.created_at = now;
        user.updated_at = now;
        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_insert_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new_with_password("a@example.com".to_string(), "h".to_string())).await.unwrap();

        let result = repo.insert(User::new_with_password("a@example.com".to_string(), "h2".to_string())).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_find_by_id_with_malformed_id() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_upsert_creates_passwordless_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo.upsert_external_identity("new@example.com", "g-1").await.unwrap();

        assert!(user.id.is_some());
        assert!(user.password_hash.is_none());
        assert_eq!(user.google_id.as_deref(), Some("g-1"));
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_upsert_links_existing_password_user() {
        let repo = InMemoryUserRepository::new();
        let existing = repo
            .insert(User::new_with_password("a@example.com".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let linked = repo.upsert_external_identity("a@example.com", "g-1").await.unwrap();
        assert_eq!(linked.id, existing.id);
        assert_eq!(linked.password_hash.as_deref(), Some("hash"));
        assert_eq!(linked.google_id.as_deref(), Some("g-1"));
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_upsert_never_overwrites_google_id() {
        let repo = InMemoryUserRepository::new();
        repo.upsert_external_identity("a@example.com", "g-1").await.unwrap();

        let again = repo.upsert_external_identity("a@example.com", "g-2").await.unwrap();
        assert_eq!(again.google_id.as_deref(), Some("g-1"));
    }

    #[actix_web::test]
    async fn test_upsert_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        let first = repo.upsert_external_identity("a@example.com", "g-1").await.unwrap();
        let second = repo.upsert_external_identity("a@example.com", "g-1").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.updated_at, second.updated_at);
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_upsert_prefers_email_over_google_id_owner() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new_with_password("a@example.com".to_string(), "h".to_string())).await.unwrap();
        let owner = repo.upsert_external_identity("b@example.com", "g-1").await.unwrap();

        let result = repo.upsert_external_identity("a@example.com", "g-1").await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));

        let a = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        assert!(a.google_id.is_none());
        let b = repo.find_by_email("b@example.com").await.unwrap().unwrap();
        assert_eq!(b.id, owner.id);
        assert_eq!(repo.len(), 2);
    }

    #[actix_web::test]
    async fn test_upsert_falls_back_to_google_id() {
        let repo = InMemoryUserRepository::new();
        let owner = repo.upsert_external_identity("old@example.com", "g-1").await.unwrap();

        let again = repo.upsert_external_identity("new@example.com", "g-1").await.unwrap();
        assert_eq!(again.id, owner.id);
        assert_eq!(again.email, "old@example.com");
        assert_eq!(repo.len(), 1);
    }
}
