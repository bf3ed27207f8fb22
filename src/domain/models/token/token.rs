//! 세션 토큰 모델

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::dto::users::response::UserSummary;

/// 세션 토큰(JWT) 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 사용자 ID (ObjectId hex)
    pub sub: String,
    pub email: String,
    pub provider: AuthProvider,
    pub iat: i64,
    pub exp: i64,
    /// 최초 로그인 시각. 토큰 갱신 시에도 유지됩니다.
    pub auth_time: i64,
}

/// 서명된 세션 토큰과 만료 시각
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// 로그인 성공 결과
#[derive(Debug, Clone)]
pub struct SignedInSession {
    pub user: UserSummary,
    pub provider: AuthProvider,
    pub token: IssuedToken,
}

/// 로그인/세션 조회 응답 본문
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserSummary,
    pub provider: AuthProvider,
    pub expires_at: DateTime<Utc>,
}

impl From<&SignedInSession> for SessionResponse {
    fn from(session: &SignedInSession) -> Self {
        Self {
            user: session.user.clone(),
            provider: session.provider,
            expires_at: session.token.expires_at,
        }
    }
}
