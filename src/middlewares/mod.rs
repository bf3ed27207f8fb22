//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### SessionGuard
//! - 세션 쿠키 또는 Bearer 헤더에서 세션 토큰 추출 및 검증
//! - 사용자 정보를 request extension에 저장
//! - 공개 경로(선택적 인증)와 보호 경로(로그인 페이지로 리디렉션) 구분
//! - 오래된 세션 토큰 갱신
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use crate::middlewares::SessionGuard;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .wrap(SessionGuard::new(sessions.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::SessionGuard;
