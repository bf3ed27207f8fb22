//! # User HTTP Handlers
//!
//! 로그인한 사용자 본인의 정보를 조회합니다. `SessionGuard`가 보호하는 경로입니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/api/me` | 저장된 사용자 요약 (비밀번호 해시 제외) |

use actix_web::{get, web, HttpResponse};
use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::auth::authenticated_user::AuthenticatedUser;

#[get("/me")]
pub async fn get_current_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_profile(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
