//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성자로 의존성을 받아 만들어지고 이후 불변입니다.
//! `AppState`가 `Arc`로 묶어 핸들러와 미들웨어에 공유합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, auth::SessionService};
//!
//! let users = Arc::new(UserService::new(store, PasswordConfig::bcrypt_cost()));
//! let sessions = Arc::new(SessionService::new(users.clone(), SessionSettings::from_env()));
//! ```

pub mod users;
pub mod auth;
