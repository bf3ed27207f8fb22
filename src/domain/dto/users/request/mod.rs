//! # 사용자 관련 요청 DTO 모듈
//!
//! 클라이언트 JSON/쿼리를 구조화된 Rust 타입으로 변환하고 검증합니다.
//!
//! ## 검증 계층
//!
//! 1. **구문 검증**: JSON 구조와 타입 (`serde`)
//! 2. **필수값 검증**: 누락/공백 필드 → `AppError::MissingField`
//! 3. **형식 검증**: 이메일 형식 등 (`validator`) → `AppError::ValidationError`

pub mod auth_request;

pub use auth_request::{Credentials, CredentialsRequest, OAuthCallbackQuery, SignInQuery};
