//! # 사용자 관련 응답 DTO 모듈
//!
//! 민감한 정보(비밀번호 해시)는 응답에서 제외합니다.
//!
//! - `UserSummary` - 회원가입/로그인/세션 응답에 들어가는 `{ id, email }`
//! - `RegisterResponse` - 회원가입 완료 응답
//! - `UserProfileResponse` - `/api/me` 응답
//! - `GoogleTokenResponse`, `OAuthLoginUrlResponse`, `ProviderInfo` - OAuth 관련

pub mod user_response;
pub mod google_oauth_response;

pub use user_response::{RegisterResponse, UserProfileResponse, UserSummary};
pub use google_oauth_response::{GoogleTokenResponse, OAuthLoginUrlResponse, ProviderInfo};
