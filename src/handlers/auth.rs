//! Authentication HTTP Handlers
//!
//! `/api/auth` 아래의 회원가입, 로그인, 세션 조회, 로그아웃 엔드포인트입니다.
//! 모두 공개 경로이며 세션은 HttpOnly 쿠키(`vidshare.session-token`)로 전달됩니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/register` | 이메일/비밀번호 회원가입 (201) |
//! | `GET` | `/providers` | 사용 가능한 로그인 프로바이더 |
//! | `POST` | `/signin/credentials` | 비밀번호 로그인 + 세션 쿠키 |
//! | `GET` | `/signin/google` | Google 동의 화면으로 302 |
//! | `GET` | `/callback/google` | Google 콜백 → 세션 쿠키 + 302 |
//! | `GET` | `/session` | 현재 세션 또는 `{}` |
//! | `POST` | `/signout` | 세션 쿠키 삭제 |

use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use crate::config::{AuthProvider, OAUTH_STATE_COOKIE_NAME, SIGN_IN_PATH};
use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::auth::authenticated_user::OptionalUser;
use crate::domain::auth::sign_in::SignInRequest;
use crate::domain::dto::users::request::{CredentialsRequest, OAuthCallbackQuery, SignInQuery};
use crate::domain::dto::users::response::{ProviderInfo, RegisterResponse, UserSummary};
use crate::domain::token::token::SessionResponse;

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "회원가입이 완료되었습니다".to_string(),
        user,
    }))
}

#[get("/providers")]
pub async fn providers(state: web::Data<AppState>) -> HttpResponse {
    let mut providers = vec![ProviderInfo {
        id: AuthProvider::Credentials.as_str().to_string(),
        name: "Email".to_string(),
        kind: "credentials".to_string(),
        signin_url: "/api/auth/signin/credentials".to_string(),
    }];

    if state.google.is_some() {
        providers.push(ProviderInfo {
            id: AuthProvider::Google.as_str().to_string(),
            name: "Google".to_string(),
            kind: "oauth".to_string(),
            signin_url: "/api/auth/signin/google".to_string(),
        });
    }

    HttpResponse::Ok().json(providers)
}

#[post("/signin/credentials")]
pub async fn sign_in_with_credentials(
    state: web::Data<AppState>,
    payload: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let credentials = payload.into_inner().into_sign_in()?;

    let session = state.session_service
        .sign_in(SignInRequest::Credentials {
            email: credentials.email,
            password: credentials.password,
        })
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(state.session_service.session_cookie(&session.token))
        .json(SessionResponse::from(&session)))
}

#[get("/signin/google")]
pub async fn sign_in_with_google(
    state: web::Data<AppState>,
    query: web::Query<SignInQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(google) = state.google.as_deref() else {
        return Ok(provider_not_configured());
    };

    let login = google.authorization_url(query.callback_url.as_deref())?;
    let secure = state.session_service.settings().cookie_secure;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, login.login_url))
        .cookie(google.state_cookie(&login.state, secure))
        .finish())
}

/// Google 콜백
///
/// 실패하면 에러 코드를 붙여 로그인 페이지로 돌려보냅니다 (`/login?error=<code>`).
#[get("/callback/google")]
pub async fn google_callback(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<OAuthCallbackQuery>,
) -> HttpResponse {
    let Some(google) = state.google.as_deref() else {
        return provider_not_configured();
    };
    let secure = state.session_service.settings().cookie_secure;

    if let Some(error) = &query.error {
        log::warn!(
            "Google OAuth 에러: {} - {}",
            error,
            query.error_description.as_deref().unwrap_or("사용자가 동의를 거부했거나 인증에 실패했습니다")
        );
        return redirect_to_sign_in("AccessDenied").cookie(google.clear_state_cookie(secure)).finish();
    }

    let (Some(code), Some(oauth_state)) = (query.code.as_deref(), query.state.as_deref()) else {
        return redirect_to_sign_in("MissingField").cookie(google.clear_state_cookie(secure)).finish();
    };

    let cookie_state = req.cookie(OAUTH_STATE_COOKIE_NAME).map(|c| c.value().to_string());

    let result = async {
        let completed = google.complete(code, oauth_state, cookie_state.as_deref()).await?;
        let session = state.session_service
            .sign_in(SignInRequest::External(completed.identity))
            .await?;
        Ok::<_, AppError>((session, completed.callback_url))
    }
    .await;

    match result {
        Ok((session, callback_url)) => HttpResponse::Found()
            .insert_header((header::LOCATION, callback_url))
            .cookie(state.session_service.session_cookie(&session.token))
            .cookie(google.clear_state_cookie(secure))
            .finish(),
        Err(e) => {
            log::warn!("Google 로그인 실패: {}", e);
            redirect_to_sign_in(e.code()).cookie(google.clear_state_cookie(secure)).finish()
        }
    }
}

/// 현재 세션. 세션이 없으면 `{}`.
#[get("/session")]
pub async fn current_session(user: OptionalUser) -> HttpResponse {
    match user.0 {
        Some(user) => HttpResponse::Ok().json(SessionResponse {
            user: UserSummary {
                id: user.user_id,
                email: user.email,
            },
            provider: user.provider,
            expires_at: user.expires_at,
        }),
        None => HttpResponse::Ok().json(json!({})),
    }
}

/// 로그아웃. 서버에 폐기 목록은 없고 클라이언트 쿠키만 지웁니다.
#[post("/signout")]
pub async fn sign_out(state: web::Data<AppState>, user: OptionalUser) -> HttpResponse {
    if let Some(user) = user.0 {
        log::info!("로그아웃: {}", user.email);
    }

    HttpResponse::Ok()
        .cookie(state.session_service.clear_session_cookie())
        .json(json!({ "message": "로그아웃되었습니다" }))
}

fn redirect_to_sign_in(error_code: &str) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((
        header::LOCATION,
        format!("{}?error={}", SIGN_IN_PATH, urlencoding::encode(error_code)),
    ));
    builder
}

fn provider_not_configured() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "ProviderNotConfigured",
        "message": "Google 로그인이 설정되지 않았습니다",
    }))
}
