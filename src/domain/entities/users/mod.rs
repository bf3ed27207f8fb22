//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! // 비밀번호 회원가입
//! let user = User::new_with_password("user@example.com".to_string(), password_hash);
//!
//! // 첫 Google 로그인
//! let google_user = User::new_external("user@gmail.com".to_string(), "google_user_id_123".to_string());
//! ```

pub mod user;
