//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 서비스 호출로 옮기고 결과를 응답으로 바꾸는 얇은 계층입니다.
//! 비즈니스 규칙은 서비스에 있고, 핸들러는 `web::Data<AppState>`에서 서비스를 꺼내 씁니다.
//!
//! ```text
//! Client ─▶ SessionGuard ─▶ Handlers (이 모듈) ─▶ Services ─▶ UserStore
//! ```
//!
//! 에러는 `AppError`를 반환하면 `ResponseError` 구현이 JSON 응답으로 바꿉니다.
//! Google 콜백처럼 브라우저가 직접 여는 경로는 에러를 `/login?error=<code>` 리디렉션으로 돌려줍니다.

pub mod auth;
pub mod users;
