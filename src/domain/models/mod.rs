//! # Domain Models
//!
//! 영속되지 않는 인증 도메인 값 객체들입니다.
//!
//! - `auth`: 로그인 요청(tagged variant), 인증된 사용자 extractor, 공개 경로 판정
//! - `token`: 세션 토큰 클레임과 발급 결과
//! - `oauth`: 외부 프로바이더가 보증한 신원과 Google 응답 모델

pub mod auth;
pub mod token;
pub mod oauth;
