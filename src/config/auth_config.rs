//! # Authentication Configuration Module
//!
//! 세션 토큰, Google OAuth 프로바이더, OAuth state 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! 환경 변수를 읽는 부분(`SessionConfig`, `GoogleOAuthConfig`, `OAuthConfig`)과
//! 서비스에 주입되는 불변 설정값(`SessionSettings`, `GoogleOAuthSettings`)을 분리합니다.
//! 서비스는 생성 시점에 한 번 읽은 값만 사용하므로 테스트에서 환경 변수를 건드릴 필요가 없습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### 세션 토큰 설정
//! ```bash
//! export SESSION_SECRET="your-super-secret-session-key"
//! export SESSION_MAX_AGE_DAYS="30"
//! export SESSION_UPDATE_AGE_HOURS="24"
//! export SESSION_COOKIE_SECURE="true"
//! ```
//!
//! ### Google OAuth 설정 (선택)
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/auth/callback/google"
//! export OAUTH_STATE_TIMEOUT_MINUTES="10"
//! ```
//!
//! `GOOGLE_CLIENT_ID` 또는 `GOOGLE_CLIENT_SECRET`이 없으면 Google 로그인은 비활성화됩니다.

use std::env;
use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use crate::config::data_config::Environment;

/// 세션 쿠키 이름
pub const SESSION_COOKIE_NAME: &str = "vidshare.session-token";

/// OAuth state 쿠키 이름 (double-submit 검증용)
pub const OAUTH_STATE_COOKIE_NAME: &str = "vidshare.oauth-state";

/// 로그인 진입점 경로. 인증되지 않은 요청은 이곳으로 리디렉션됩니다.
pub const SIGN_IN_PATH: &str = "/login";

/// 세션 토큰 관련 환경 변수
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하며 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("SESSION_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
                "vidshare-dev-session-secret".to_string()
            })
    }

    /// 세션 최대 수명 (일). 기본값 30일, 허용 범위 1-3650.
    pub fn max_age_days() -> i64 {
        Self::bounded("SESSION_MAX_AGE_DAYS", env::var("SESSION_MAX_AGE_DAYS").ok().as_deref(), 30, 1..=3650)
    }

    /// 토큰 갱신 간격 (시간). 발급 후 이 시간이 지난 토큰만 요청 시 재발급됩니다.
    /// 기본값 24시간, 허용 범위 0-8760.
    pub fn update_age_hours() -> i64 {
        Self::bounded("SESSION_UPDATE_AGE_HOURS", env::var("SESSION_UPDATE_AGE_HOURS").ok().as_deref(), 24, 0..=8760)
    }

    /// 범위를 벗어나거나 숫자가 아닌 값은 경고 후 기본값으로 대체
    fn bounded(key: &str, raw: Option<&str>, default: i64, range: RangeInclusive<i64>) -> i64 {
        let Some(raw) = raw else {
            return default;
        };

        match raw.trim().parse::<i64>() {
            Ok(value) if range.contains(&value) => value,
            Ok(value) => {
                log::warn!(
                    "{}={} 는 허용 범위({}-{})를 벗어납니다. 기본값 {} 사용",
                    key, value, range.start(), range.end(), default
                );
                default
            }
            Err(_) => {
                log::warn!("{}={} 는 숫자가 아닙니다. 기본값 {} 사용", key, raw, default);
                default
            }
        }
    }

    /// 쿠키 `Secure` 속성 여부. 미설정 시 운영 환경에서만 `true`.
    pub fn cookie_secure() -> bool {
        match env::var("SESSION_COOKIE_SECURE") {
            Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => Environment::current().is_production(),
        }
    }
}

/// 세션 서비스에 주입되는 불변 설정값
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub max_age: chrono::Duration,
    pub update_age: chrono::Duration,
    pub cookie_secure: bool,
}

impl SessionSettings {
    pub fn from_env() -> Self {
        Self {
            secret: SessionConfig::secret(),
            max_age: chrono::Duration::days(SessionConfig::max_age_days()),
            update_age: chrono::Duration::hours(SessionConfig::update_age_hours()),
            cookie_secure: SessionConfig::cookie_secure(),
        }
    }
}

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 관리합니다.
/// 승인된 리디렉션 URI에 `GOOGLE_REDIRECT_URI` 값이 등록되어 있어야 합니다.
///
/// ## 보안 고려사항
///
/// - `client_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> Option<String> {
        non_empty_var("GOOGLE_CLIENT_ID")
    }

    /// 이 값을 로그에 출력하지 마세요.
    pub fn client_secret() -> Option<String> {
        non_empty_var("GOOGLE_CLIENT_SECRET")
    }

    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/api/auth/callback/google".to_string())
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// OAuth 흐름 공통 설정
pub struct OAuthConfig;

impl OAuthConfig {
    /// 로그인 시작부터 콜백까지 허용되는 시간 (분). 기본값 10분.
    pub fn state_timeout_minutes() -> i64 {
        env::var("OAUTH_STATE_TIMEOUT_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

/// Google 프로바이더 서비스에 주입되는 불변 설정값
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    /// state 토큰 서명키 (세션 비밀키를 공유합니다)
    pub state_secret: String,
    pub state_timeout: chrono::Duration,
}

impl GoogleOAuthSettings {
    /// 클라이언트 ID/시크릿이 모두 설정된 경우에만 `Some`을 반환합니다.
    pub fn from_env(state_secret: &str) -> Option<Self> {
        let client_id = GoogleOAuthConfig::client_id()?;
        let client_secret = GoogleOAuthConfig::client_secret()?;

        Some(Self {
            client_id,
            client_secret,
            redirect_uri: GoogleOAuthConfig::redirect_uri(),
            auth_uri: GoogleOAuthConfig::auth_uri(),
            token_uri: GoogleOAuthConfig::token_uri(),
            userinfo_uri: GoogleOAuthConfig::userinfo_uri(),
            state_secret: state_secret.to_string(),
            state_timeout: chrono::Duration::minutes(OAuthConfig::state_timeout_minutes()),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// 로그인 프로바이더 종류
///
/// 세션 토큰의 `provider` 클레임으로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호 로그인
    Credentials,

    /// Google OAuth 2.0
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Credentials => "credentials",
            AuthProvider::Google => "google",
        }
    }

    pub fn is_external(&self) -> bool {
        !matches!(self, AuthProvider::Credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");

        let deserialized: AuthProvider = serde_json::from_str("\"credentials\"").unwrap();
        assert_eq!(deserialized, AuthProvider::Credentials);
        assert!(!deserialized.is_external());
    }

    #[test]
    fn test_session_ages_out_of_range_fall_back() {
        assert_eq!(SessionConfig::bounded("SESSION_MAX_AGE_DAYS", Some("-5"), 30, 1..=3650), 30);
        assert_eq!(SessionConfig::bounded("SESSION_MAX_AGE_DAYS", Some("999999999999"), 30, 1..=3650), 30);
        assert_eq!(SessionConfig::bounded("SESSION_MAX_AGE_DAYS", Some("abc"), 30, 1..=3650), 30);
        assert_eq!(SessionConfig::bounded("SESSION_MAX_AGE_DAYS", Some(" 7 "), 30, 1..=3650), 7);
        assert_eq!(SessionConfig::bounded("SESSION_UPDATE_AGE_HOURS", Some("0"), 24, 0..=8760), 0);
        assert_eq!(SessionConfig::bounded("SESSION_UPDATE_AGE_HOURS", None, 24, 0..=8760), 24);
    }

    #[test]
    fn test_session_defaults() {
        if env::var("SESSION_MAX_AGE_DAYS").is_err() {
            assert_eq!(SessionConfig::max_age_days(), 30);
        }
        if env::var("SESSION_UPDATE_AGE_HOURS").is_err() {
            assert_eq!(SessionConfig::update_age_hours(), 24);
        }
    }
}
