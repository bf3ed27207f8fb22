//! Google 사용자 정보 모델
//!
//! `GOOGLE_USERINFO_URI` (기본: `https://www.googleapis.com/oauth2/v2/userinfo`) 응답을 매핑합니다.
//! 로그인에 필요한 것은 `id`, `email`, `verified_email` 뿐이고 나머지 프로필 필드는
//! 로그에만 사용합니다.

use serde::Deserialize;
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::oauth::external_identity::ExternalIdentity;

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 ID
    pub id: String,

    /// `email` scope가 거부되면 응답에 없을 수 있습니다
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub verified_email: Option<bool>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// 세션 서비스가 사용할 `ExternalIdentity`로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderAssertionInvalid` - 이메일이 없거나 Google이 인증하지 않은 이메일
    pub fn into_identity(self) -> Result<ExternalIdentity, AppError> {
        let email = self.email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AppError::ProviderAssertionInvalid(
                "Google이 이메일을 제공하지 않았습니다".to_string()
            ))?;

        if self.verified_email == Some(false) {
            return Err(AppError::ProviderAssertionInvalid(
                format!("Google에서 인증되지 않은 이메일입니다: {}", email)
            ));
        }

        let identity = ExternalIdentity::new(AuthProvider::Google, &email, &self.id);
        identity.validate()?;
        Ok(identity)
    }
}
