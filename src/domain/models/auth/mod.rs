//! 인증 요청/결과 모델

pub mod authenticated_user;
pub mod authentication_request;
pub mod sign_in;
