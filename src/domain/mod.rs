//! # Domain Layer
//!
//! 인증 서비스의 도메인 타입을 모아둔 계층입니다.
//!
//! - [`entities`]: 저장소에 영속되는 `User`
//! - [`models`]: 로그인 요청, 외부 프로바이더 신원, 세션 클레임 등 값 객체
//! - [`dto`]: HTTP 요청/응답 본문
//!
//! 하위 모듈은 `crate::domain::auth`, `crate::domain::token` 처럼 짧은 경로로도 접근할 수 있습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use models::{auth, oauth, token};
