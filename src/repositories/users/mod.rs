//! 사용자 데이터 액세스 계층
//!
//! 서비스 계층은 [`UserStore`] 트레이트에만 의존합니다. 구현은 두 가지입니다.
//!
//! - [`MongoUserRepository`](user_repo::MongoUserRepository) - MongoDB `users` 컬렉션
//! - [`InMemoryUserRepository`](memory_repo::InMemoryUserRepository) - 테스트와 로컬 개발용
//!   (`USER_STORE=memory`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{UserStore, InMemoryUserRepository};
//!
//! let store: Arc<dyn UserStore> = Arc::new(InMemoryUserRepository::new());
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;
pub mod memory_repo;

pub use user_repo::MongoUserRepository;
pub use memory_repo::InMemoryUserRepository;

use async_trait::async_trait;
use crate::core::errors::AppError;
use crate::domain::entities::users::user::User;

/// 사용자 저장소 포트
///
/// 이메일은 호출자가 정규화(`normalize_email`)한 값을 넘겨야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// ID(ObjectId hex)로 조회합니다. 형식이 잘못된 ID는 `None`입니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 새 사용자 저장
    ///
    /// # Errors
    ///
    /// * `AppError::AlreadyExists` - 같은 이메일(또는 Google ID)의 사용자가 이미 있음
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// 외부 ID로 사용자를 찾거나 만들고, 비어 있는 `google_id`를 채웁니다.
    ///
    /// 이메일이 일치하는 사용자가 우선이고, 없으면 Google ID가 일치하는 사용자를 반환합니다.
    /// 기존 `google_id`와 `email`은 덮어쓰지 않습니다. 둘 다 없으면 비밀번호 없는 사용자를 만듭니다.
    /// 이메일 사용자에게 다른 사용자의 Google ID를 연결하려 하면 `AlreadyExists`입니다.
    /// 같은 신원으로 동시에 호출해도 사용자는 하나만 생깁니다.
    async fn upsert_external_identity(&self, email: &str, google_id: &str) -> Result<User, AppError>;
}
