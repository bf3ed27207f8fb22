//! # OAuth Domain Models
//!
//! 외부 신원 프로바이더와 주고받는 모델입니다.
//!
//! - [`external_identity`]: 프로바이더가 보증한 `(email, subject)` 쌍. 세션 서비스는 이 타입만 압니다.
//! - [`google_oauth_model`]: Google 토큰/사용자 정보 응답과 `ExternalIdentity` 변환

pub mod external_identity;
pub mod google_oauth_model;
