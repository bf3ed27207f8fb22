//! # Configuration Module
//!
//! 환경 변수 기반 설정을 제공합니다.
//!
//! - [`data_config`]: 실행 환경, bcrypt cost, 서버/DB/CORS/Rate Limit 설정
//! - [`auth_config`]: 세션 토큰, Google OAuth, 로그인 프로바이더
//!
//! `.env` 파일 로딩은 `main.rs`의 `PROFILE` 처리에서 이루어지며,
//! 이 모듈은 이미 로드된 프로세스 환경 변수만 읽습니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
