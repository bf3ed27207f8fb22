//! Google OAuth 2.0 응답 모델

pub mod google_user;
