//! API 라우트 설정 모듈
//!
//! 엔드포인트를 기능별로 묶어 등록합니다. 인증 정책은 라우트가 아니라
//! 앱 전체를 감싸는 `SessionGuard`가 경로별로 적용합니다.
//!
//! | 범위 | 경로 | 인증 |
//! |------|------|------|
//! | 헬스체크 | `/health` | 공개 |
//! | 인증 | `/api/auth/*` | 공개 (세션이 있으면 사용자 정보 첨부) |
//! | 사용자 | `/api/me` | 필요 (없으면 `/login`으로 302) |
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::new(state.clone()))
//!     .wrap(SessionGuard::new(state.session_service.clone()))
//!     .configure(configure_all_routes)
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::providers)
            .service(handlers::auth::sign_in_with_credentials)
            .service(handlers::auth::sign_in_with_google)
            .service(handlers::auth::google_callback)
            .service(handlers::auth::current_session)
            .service(handlers::auth::sign_out)
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::users::get_current_user)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "vidshare_auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
