//! vidshare 인증 서비스
//!
//! 영상 공유 서비스의 회원가입, 로그인, 세션 관리를 담당하는 actix-web 백엔드입니다.
//!
//! # Features
//!
//! - **회원가입**: 이메일/비밀번호, bcrypt 해싱, 이메일 유니크 제약
//! - **비밀번호 로그인**: Credential Verifier
//! - **Google 로그인**: OAuth 2.0 Authorization Code Flow, 기존 계정 자동 연결
//! - **세션**: HS256 JWT 쿠키, 30일 최대 수명, 사용 시 갱신, 서버 세션 테이블 없음
//! - **라우트 가드**: 보호 경로의 미인증 요청을 `/login`으로 리디렉션
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  SessionGuard   │ ← 세션 토큰 검증/갱신, 리디렉션
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← UserService, SessionService, GoogleAuthService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserStore     │ ← MongoDB 또는 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use vidshare_auth::core::AppState;
//! use vidshare_auth::domain::auth::sign_in::SignInRequest;
//!
//! let state = AppState::from_env().await?;
//! let session = state.session_service
//!     .sign_in(SignInRequest::Credentials { email, password })
//!     .await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
