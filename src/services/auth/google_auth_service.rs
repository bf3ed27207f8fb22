//! # Google OAuth 2.0 프로바이더
//!
//! Authorization Code Flow로 Google 사용자를 확인하고 [`ExternalIdentity`]로 넘겨줍니다.
//! 사용자 저장소는 건드리지 않으며, 저장된 사용자와의 연결은 `SessionService::sign_in`이 합니다.
//!
//! ```text
//! 브라우저                     우리 서버                           Google
//!    │ GET /api/auth/signin/google   │                                 │
//!    ├──────────────────────────────►│ state JWT 생성 + state 쿠키      │
//!    │◄──────── 302 consent URL ─────┤                                 │
//!    ├───────────────────────────────┼──────── 로그인/동의 ───────────►│
//!    │◄──────────────────────────────┼──── 302 callback?code&state ────┤
//!    │ GET /api/auth/callback/google │                                 │
//!    ├──────────────────────────────►│ state == 쿠키? 서명/만료 확인    │
//!    │                               ├──── code → access_token ───────►│
//!    │                               ├──── userinfo ──────────────────►│
//!    │                               │ GoogleUserInfo → ExternalIdentity│
//! ```
//!
//! ## CSRF 방지
//!
//! `state`는 nonce와 로그인 후 돌아갈 경로를 담은 짧은 수명의 서명된 JWT입니다.
//! 같은 값을 HttpOnly 쿠키에도 넣어두고 콜백에서 두 값이 일치하는지 확인합니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use crate::config::{GoogleOAuthSettings, OAUTH_STATE_COOKIE_NAME};
use crate::core::errors::AppError;
use crate::domain::dto::users::response::google_oauth_response::{GoogleTokenResponse, OAuthLoginUrlResponse};
use crate::domain::oauth::external_identity::ExternalIdentity;
use crate::domain::oauth::google_oauth_model::google_user::GoogleUserInfo;
use crate::utils::string_utils::safe_callback_path;

const STATE_AUDIENCE: &str = "vidshare.oauth-state";
const SCOPE: &str = "openid email profile";

#[derive(Debug, Serialize, Deserialize)]
struct OAuthStateClaims {
    nonce: String,
    callback_url: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// 콜백 처리 결과
#[derive(Debug)]
pub struct CompletedOAuth {
    pub identity: ExternalIdentity,
    /// 로그인 후 돌아갈 같은 사이트 경로
    pub callback_url: String,
}

pub struct GoogleAuthService {
    settings: GoogleOAuthSettings,
    client: reqwest::Client,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl GoogleAuthService {
    pub fn new(settings: GoogleOAuthSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.state_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.state_secret.as_bytes()),
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// Google 동의 화면 URL 생성
    ///
    /// # Arguments
    ///
    /// * `callback_url` - 로그인 후 돌아갈 경로. 같은 사이트 경로가 아니면 `/`로 바뀝니다.
    ///
    /// # Returns
    ///
    /// 동의 화면 URL과 state 값. state는 [`Self::state_cookie`]로 쿠키에도 넣어야 합니다.
    pub fn authorization_url(&self, callback_url: Option<&str>) -> Result<OAuthLoginUrlResponse, AppError> {
        let state = self.generate_state(&safe_callback_path(callback_url))?;

        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("scope", SCOPE),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(OAuthLoginUrlResponse {
            login_url: format!("{}?{}", self.settings.auth_uri, query_string),
            state,
        })
    }

    /// 콜백 처리
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthenticated` - state 누락/불일치/만료/위조
    /// * `AppError::ExternalServiceError` - Google 호출 실패 또는 비정상 응답
    /// * `AppError::ProviderAssertionInvalid` - 이메일이 없거나 확인되지 않은 이메일
    pub async fn complete(
        &self,
        code: &str,
        state: &str,
        cookie_state: Option<&str>,
    ) -> Result<CompletedOAuth, AppError> {
        let callback_url = self.verify_state(state, cookie_state)?;

        let token = self.exchange_code_for_token(code).await?;
        let google_user = self.get_user_info(&token.access_token).await?;
        let identity = google_user.into_identity()?;

        log::info!("Google 사용자 확인: {}", identity.email);
        Ok(CompletedOAuth { identity, callback_url })
    }

    /// state 검증 후 저장된 callback 경로 반환
    pub fn verify_state(&self, state: &str, cookie_state: Option<&str>) -> Result<String, AppError> {
        match cookie_state {
            Some(expected) if expected == state => {}
            _ => {
                return Err(AppError::Unauthenticated("OAuth state가 일치하지 않습니다".to_string()));
            }
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[STATE_AUDIENCE]);

        let claims = decode::<OAuthStateClaims>(state, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthenticated(format!("유효하지 않은 OAuth state: {}", e)))?
            .claims;

        Ok(safe_callback_path(Some(&claims.callback_url)))
    }

    /// state 쿠키 (`/api/auth/` 경로 전용)
    pub fn state_cookie(&self, state: &str, secure: bool) -> Cookie<'static> {
        Cookie::build(OAUTH_STATE_COOKIE_NAME, state.to_string())
            .path("/api/auth/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(CookieDuration::seconds(self.settings.state_timeout.num_seconds().max(0)))
            .finish()
    }

    pub fn clear_state_cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build(OAUTH_STATE_COOKIE_NAME, "")
            .path("/api/auth/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(CookieDuration::ZERO)
            .finish()
    }

    fn generate_state(&self, callback_url: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = OAuthStateClaims {
            nonce: uuid::Uuid::new_v4().to_string(),
            callback_url: callback_url.to_string(),
            aud: STATE_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.settings.state_timeout).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("OAuth state 생성 실패: {}", e)))
    }

    async fn exchange_code_for_token(&self, auth_code: &str) -> Result<GoogleTokenResponse, AppError> {
        let params = [
            ("code", auth_code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.client
            .post(&self.settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패 ({}): {}", status, error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self.client
            .get(&self.settings.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패 ({}): {}", status, error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }
}
