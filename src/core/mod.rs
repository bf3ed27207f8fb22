//! # Core Module
//!
//! - [`errors`]: 애플리케이션 전역 에러 타입 `AppError`와 HTTP 응답 변환
//! - [`state`]: 서비스 그래프를 조립한 `AppState`
//!
//! 서비스는 전역 싱글톤이 아니라 `AppState`가 만들어 `web::Data`로 공유합니다.
//!
//! ```rust,ignore
//! let state = AppState::from_env().await?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(state.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::AppState;
