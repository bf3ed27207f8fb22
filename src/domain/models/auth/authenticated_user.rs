//! 인증된 사용자 정보
//!
//! `SessionGuard` 미들웨어가 세션 토큰을 검증한 뒤 Request Extensions에 넣어두는 값입니다.
//! 핸들러는 extractor로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! async fn me(user: AuthenticatedUser) -> HttpResponse { ... }
//!
//! #[get("/session")]
//! async fn session(user: OptionalUser) -> HttpResponse { ... }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::token::token::SessionClaims;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,

    pub email: String,

    pub provider: AuthProvider,

    /// 현재 토큰의 만료 시각
    pub expires_at: DateTime<Utc>,
}

impl From<&SessionClaims> for AuthenticatedUser {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            provider: claims.provider,
            expires_at: Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_else(Utc::now),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 세션이 없어도 실패하지 않는 extractor
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
