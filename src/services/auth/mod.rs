//! 인증 서비스 모듈
//!
//! - [`session_service`]: 로그인 분기, 세션 토큰 발급/검증/갱신, 세션 쿠키
//! - [`google_auth_service`]: Google OAuth 2.0 핸드셰이크
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - CSRF 방지 (서명된 OAuth state + 쿠키 이중 확인)
//! - 만료 판정 leeway 없음

pub mod session_service;
pub mod google_auth_service;

pub use session_service::{extract_bearer_token, SessionService};
pub use google_auth_service::{CompletedOAuth, GoogleAuthService};
