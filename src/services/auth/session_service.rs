//! 세션 발급 서비스 (Session Issuer)
//!
//! 로그인 요청을 프로바이더 종류별로 분기해 사용자를 확정하고, 자기완결적인
//! HS256 JWT 세션 토큰을 발급합니다. 서버 쪽 세션 테이블은 없으며 검증은
//! 토큰과 서명키만으로 이루어집니다.
//!
//! ```text
//! Anonymous ──sign_in──▶ Authenticating ──ok──▶ Authenticated ──만료/로그아웃/위조──▶ Anonymous
//!                              │
//!                              └──err──▶ Anonymous (세션 없음)
//! ```

use std::sync::Arc;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{info, warn};
use crate::config::{AuthProvider, SessionSettings, SESSION_COOKIE_NAME};
use crate::core::errors::AppError;
use crate::domain::auth::sign_in::SignInRequest;
use crate::domain::dto::users::response::UserSummary;
use crate::domain::entities::users::user::User;
use crate::domain::token::token::{IssuedToken, SessionClaims, SignedInSession};
use crate::services::users::UserService;

pub struct SessionService {
    users: Arc<UserService>,
    settings: SessionSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(users: Arc<UserService>, settings: SessionSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            users,
            settings,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// 로그인
    ///
    /// - `Credentials`: 이메일/비밀번호 검증 후 토큰 발급
    /// - `External`: 외부 신원을 저장된 사용자와 연결(없으면 생성)한 뒤 토큰 발급
    ///
    /// 실패하면 세션을 만들지 않고 에러를 그대로 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `NotFound`, `InvalidCredential` - 비밀번호 로그인 실패
    /// * `ProviderAssertionInvalid`, `AlreadyExists`, `DatabaseError` - 외부 로그인 실패
    pub async fn sign_in(&self, request: SignInRequest) -> Result<SignedInSession, AppError> {
        let provider = request.provider();
        let email = request.email().to_string();

        let result = match request {
            SignInRequest::Credentials { email, password } => {
                self.users.verify_credentials(&email, &password).await
            }
            SignInRequest::External(identity) => {
                self.users.reconcile_external_identity(&identity).await
            }
        };

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                warn!("로그인 거부 [{}] {}: {}", provider.as_str(), email, e.code());
                return Err(e);
            }
        };

        let token = self.issue(&user, provider)?;
        info!("✅ 로그인 성공 [{}] {}", provider.as_str(), user.email);

        Ok(SignedInSession {
            user: UserSummary::from(&user),
            provider,
            token,
        })
    }

    /// 세션 토큰 발급
    pub fn issue(&self, user: &User, provider: AuthProvider) -> Result<IssuedToken, AppError> {
        let sub = user.id_string().ok_or_else(|| {
            AppError::InternalError("저장되지 않은 사용자에게 세션을 발급할 수 없습니다".to_string())
        })?;

        let now = Utc::now();
        let claims = SessionClaims {
            sub,
            email: user.email.clone(),
            provider,
            iat: now.timestamp(),
            exp: (now + self.settings.max_age).timestamp(),
            auth_time: now.timestamp(),
        };

        self.sign(&claims)
    }

    /// 세션 토큰 검증
    ///
    /// 만료 판정에 여유 시간(leeway)을 두지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthenticated` - 만료, 서명 불일치, 형식 오류
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthenticated(format!("유효하지 않은 세션 토큰: {}", e)))
    }

    /// 세션 갱신
    ///
    /// 토큰 발급 후 `update_age`가 지났으면 같은 사용자/프로바이더/최초 인증 시각으로
    /// 새 토큰을 발급합니다. 아직 지나지 않았으면 `None`.
    pub fn renew(&self, claims: &SessionClaims) -> Result<Option<IssuedToken>, AppError> {
        let now = Utc::now();
        if now.timestamp() - claims.iat < self.settings.update_age.num_seconds() {
            return Ok(None);
        }

        let renewed = SessionClaims {
            iat: now.timestamp(),
            exp: (now + self.settings.max_age).timestamp(),
            ..claims.clone()
        };

        self.sign(&renewed).map(Some)
    }

    /// 세션 쿠키
    pub fn session_cookie(&self, token: &IssuedToken) -> Cookie<'static> {
        let remaining = (token.expires_at - Utc::now()).num_seconds().max(0);

        Cookie::build(SESSION_COOKIE_NAME, token.token.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.cookie_secure)
            .max_age(CookieDuration::seconds(remaining))
            .finish()
    }

    /// 로그아웃/무효 토큰용 만료 쿠키
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.cookie_secure)
            .max_age(CookieDuration::ZERO)
            .finish()
    }

    fn sign(&self, claims: &SessionClaims) -> Result<IssuedToken, AppError> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))?;

        let expires_at: DateTime<Utc> = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| AppError::InternalError("만료 시각 계산 실패".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 추출
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::dto::users::request::CredentialsRequest;
    use crate::domain::oauth::external_identity::ExternalIdentity;
    use crate::repositories::users::{InMemoryUserRepository, UserStore};

    fn settings(secret: &str) -> SessionSettings {
        SessionSettings {
            secret: secret.to_string(),
            max_age: chrono::Duration::days(30),
            update_age: chrono::Duration::hours(24),
            cookie_secure: false,
        }
    }

    fn setup() -> (SessionService, Arc<UserService>, Arc<InMemoryUserRepository>) {
        let store = Arc::new(InMemoryUserRepository::new());
        let users = Arc::new(UserService::new(store.clone(), 4));
        let sessions = SessionService::new(users.clone(), settings("test-secret"));
        (sessions, users, store)
    }

    fn credentials(email: &str, password: &str) -> SignInRequest {
        SignInRequest::Credentials { email: email.to_string(), password: password.to_string() }
    }

    fn google(email: &str, subject: &str) -> SignInRequest {
        SignInRequest::External(ExternalIdentity::new(AuthProvider::Google, email, subject))
    }

    #[actix_web::test]
    async fn test_password_sign_in_returns_same_user() {
        let (sessions, users, _) = setup();
        let registered = users.register(CredentialsRequest::new("a@example.com", "secret123")).await.unwrap();

        let first = sessions.sign_in(credentials("a@example.com", "secret123")).await.unwrap();
        let second = sessions.sign_in(credentials("a@example.com", "secret123")).await.unwrap();

        assert_eq!(first.user.id, registered.id);
        assert_eq!(second.user.id, registered.id);
        assert_eq!(first.provider, AuthProvider::Credentials);

        let claims = sessions.verify_token(&first.token.token).unwrap();
        assert_eq!(claims.sub, registered.id);
        assert_eq!(claims.provider, AuthProvider::Credentials);
    }

    #[actix_web::test]
    async fn test_wrong_password_issues_no_session() {
        let (sessions, users, _) = setup();
        users.register(CredentialsRequest::new("a@example.com", "secret123")).await.unwrap();

        let result = sessions.sign_in(credentials("a@example.com", "nope")).await;
        assert!(matches!(result, Err(AppError::InvalidCredential(_))));
    }

    #[actix_web::test]
    async fn test_google_sign_in_links_existing_account() {
        let (sessions, users, store) = setup();
        let registered = users.register(CredentialsRequest::new("a@example.com", "secret123")).await.unwrap();

        let session = sessions.sign_in(google("A@example.com", "g-42")).await.unwrap();
        assert_eq!(session.user.id, registered.id);
        assert_eq!(session.provider, AuthProvider::Google);
        assert_eq!(store.len(), 1);

        let stored = store.find_by_id(&registered.id).await.unwrap().unwrap();
        assert_eq!(stored.google_id.as_deref(), Some("g-42"));
        assert!(stored.password_hash.is_some());

        // 연결 후에도 비밀번호 로그인 가능
        assert!(sessions.sign_in(credentials("a@example.com", "secret123")).await.is_ok());
    }

    #[actix_web::test]
    async fn test_google_sign_in_creates_passwordless_user() {
        let (sessions, _, store) = setup();

        let session = sessions.sign_in(google("new@example.com", "g-7")).await.unwrap();
        assert_eq!(store.len(), 1);

        let stored = store.find_by_id(&session.user.id).await.unwrap().unwrap();
        assert!(stored.password_hash.is_none());
        assert_eq!(stored.google_id.as_deref(), Some("g-7"));

        let again = sessions.sign_in(google("new@example.com", "g-7")).await.unwrap();
        assert_eq!(again.user.id, session.user.id);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_google_sign_in_without_email_is_declined() {
        let (sessions, _, store) = setup();
        let result = sessions.sign_in(google("", "g-1")).await;

        assert!(matches!(result, Err(AppError::ProviderAssertionInvalid(_))));
        assert!(store.is_empty());
    }

    fn claims_at(iat: DateTime<Utc>, max_age: chrono::Duration) -> SessionClaims {
        SessionClaims {
            sub: "65a000000000000000000001".to_string(),
            email: "a@example.com".to_string(),
            provider: AuthProvider::Credentials,
            iat: iat.timestamp(),
            exp: (iat + max_age).timestamp(),
            auth_time: iat.timestamp(),
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserRepository::new());
        let sessions = SessionService::new(Arc::new(UserService::new(store, 4)), settings("test-secret"));

        let issued_at = Utc::now() - chrono::Duration::days(31);
        let token = sessions.sign(&claims_at(issued_at, chrono::Duration::days(30))).unwrap();

        assert!(matches!(sessions.verify_token(&token.token), Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn test_foreign_or_tampered_token_rejected() {
        let (sessions, _, _) = setup();
        let (other, _, _) = {
            let store = Arc::new(InMemoryUserRepository::new());
            let users = Arc::new(UserService::new(store.clone(), 4));
            (SessionService::new(users.clone(), settings("another-secret")), users, store)
        };

        let claims = claims_at(Utc::now(), chrono::Duration::days(30));
        let foreign = other.sign(&claims).unwrap();
        assert!(sessions.verify_token(&foreign.token).is_err());

        let genuine = sessions.sign(&claims).unwrap();
        let mut tampered = genuine.token.clone();
        tampered.push('x');
        assert!(sessions.verify_token(&tampered).is_err());
        assert!(sessions.verify_token("not.a.token").is_err());
        assert!(sessions.verify_token(&genuine.token).is_ok());
    }

    #[test]
    fn test_renew_after_update_age() {
        let (sessions, _, _) = setup();

        let fresh = claims_at(Utc::now(), chrono::Duration::days(30));
        assert!(sessions.renew(&fresh).unwrap().is_none());

        let day_old = claims_at(Utc::now() - chrono::Duration::hours(25), chrono::Duration::days(30));
        let renewed = sessions.renew(&day_old).unwrap().unwrap();
        let renewed_claims = sessions.verify_token(&renewed.token).unwrap();

        assert_eq!(renewed_claims.sub, day_old.sub);
        assert_eq!(renewed_claims.auth_time, day_old.auth_time);
        assert!(renewed_claims.exp > day_old.exp);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let (sessions, _, _) = setup();
        let token = sessions.sign(&claims_at(Utc::now(), chrono::Duration::days(30))).unwrap();

        let cookie = sessions.session_cookie(&token);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().unwrap().whole_days() >= 29);

        let cleared = sessions.clear_session_cookie();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(CookieDuration::ZERO));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
    }
}
