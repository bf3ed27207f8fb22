//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 타입입니다. 엔티티를 그대로 노출하지 않고
//! 이 계층에서 필요한 필드만 골라 직렬화합니다.

pub mod users;

pub use users::*;
