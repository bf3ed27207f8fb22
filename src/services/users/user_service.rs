//! # 사용자 서비스
//!
//! 회원가입, 비밀번호 검증(Credential Verifier), 외부 신원 연결을 담당합니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UserService                        │
//! │                                                          │
//! │  register ─────────── 입력 검증 → bcrypt 해시 → insert   │
//! │  verify_credentials ─ 이메일 조회 → bcrypt verify         │
//! │  reconcile_external ─ 단언 검증 → 이메일 우선 upsert     │
//! │  get_profile ──────── ID 조회 → DTO 변환                 │
//! └──────────────────────────┬───────────────────────────────┘
//!                            ▼
//!                   Arc<dyn UserStore>
//! ```
//!
//! ## 보안
//!
//! - 비밀번호, 해시는 로그에 남기지 않습니다.
//! - bcrypt 연산은 `web::block`으로 블로킹 스레드풀에서 실행합니다.
//! - 어떤 실패도 재시도하지 않고 즉시 호출자에게 돌려줍니다.

use std::sync::Arc;
use actix_web::web;
use log::{info, warn};
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::request::CredentialsRequest;
use crate::domain::dto::users::response::{UserProfileResponse, UserSummary};
use crate::domain::entities::users::user::User;
use crate::domain::oauth::external_identity::ExternalIdentity;
use crate::repositories::users::UserStore;
use crate::utils::string_utils::normalize_email;

/// 사용자 관리 비즈니스 로직 서비스
///
/// 생성 후에는 불변이며 `Arc`로 공유됩니다.
///
/// ```rust,ignore
/// let store: Arc<dyn UserStore> = Arc::new(InMemoryUserRepository::new());
/// let users = UserService::new(store, PasswordConfig::bcrypt_cost());
///
/// let summary = users.register(CredentialsRequest::new("a@example.com", "secret123")).await?;
/// let user = users.verify_credentials("a@example.com", "secret123").await?;
/// ```
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// 새 비밀번호 계정 생성
    ///
    /// # Errors
    ///
    /// * `AppError::MissingField` - email 또는 password 누락
    /// * `AppError::ValidationError` - 이메일 형식 오류, 72바이트 초과 비밀번호
    /// * `AppError::AlreadyExists` - 이미 등록된 이메일 (동시 가입은 유니크 인덱스가 막습니다)
    /// * `AppError::InternalError` - 해싱 실패
    pub async fn register(&self, request: CredentialsRequest) -> Result<UserSummary, AppError> {
        let credentials = request.into_registration()?;

        if self.store.find_by_email(&credentials.email).await?.is_some() {
            warn!("회원가입 거부 - 이미 등록된 이메일: {}", credentials.email);
            return Err(AppError::AlreadyExists(format!("이미 등록된 이메일입니다: {}", credentials.email)));
        }

        let start_time = std::time::Instant::now();
        let password_hash = self.hash_password(credentials.password).await?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        let user = self.store
            .insert(User::new_with_password(credentials.email, password_hash))
            .await?;

        info!("✅ 회원가입 완료: {}", user.email);
        Ok(UserSummary::from(&user))
    }

    /// 이메일/비밀번호 검증
    ///
    /// 읽기 전용입니다. 이메일은 공백 제거, 소문자 변환 후 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 해당 이메일의 사용자 없음
    /// * `AppError::InvalidCredential` - 비밀번호 없는(Google 전용) 계정, 또는 비밀번호 불일치
    /// * `AppError::InternalError` - 저장된 해시 형식 오류
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        let user = self.store
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", email)))?;

        let Some(password_hash) = user.password_hash.clone() else {
            return Err(AppError::InvalidCredential(
                "비밀번호가 설정되지 않은 계정입니다. 외부 로그인을 사용하세요".to_string()
            ));
        };

        let password = password.to_string();
        let matches = web::block(move || bcrypt::verify(password, &password_hash))
            .await
            .context("비밀번호 검증 작업 실패")?
            .context("저장된 비밀번호 해시가 올바르지 않습니다")?;

        if !matches {
            return Err(AppError::InvalidCredential("비밀번호가 일치하지 않습니다".to_string()));
        }

        Ok(user)
    }

    /// 외부 신원을 저장된 사용자와 연결
    ///
    /// 이메일, 그다음 외부 ID 순으로 사용자를 찾아 비어 있는 외부 ID를 채우고,
    /// 없으면 비밀번호 없는 사용자를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderAssertionInvalid` - 사용할 수 없는 단언
    /// * `AppError::AlreadyExists` - 동시 첫 로그인으로 유니크 제약 위반
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn reconcile_external_identity(&self, identity: &ExternalIdentity) -> Result<User, AppError> {
        identity.validate()?;

        let user = self.store
            .upsert_external_identity(&identity.email, &identity.subject)
            .await?;

        if user.google_id.as_deref() != Some(identity.subject.as_str()) {
            warn!(
                "외부 ID 불일치 - 사용자 {}는 이미 다른 {} 계정과 연결되어 있습니다",
                user.email,
                identity.provider.as_str()
            );
        }

        Ok(user)
    }

    /// 사용자 조회
    pub async fn find_by_id(&self, id: &str) -> Result<User, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    /// 프로필 조회 (`/api/me`)
    pub async fn get_profile(&self, id: &str) -> Result<UserProfileResponse, AppError> {
        Ok(UserProfileResponse::from(self.find_by_id(id).await?))
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        web::block(move || bcrypt::hash(password, cost))
            .await
            .context("비밀번호 해싱 작업 실패")?
            .context("비밀번호 해싱 실패")
    }
}
