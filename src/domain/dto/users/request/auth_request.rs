//! 인증 요청 DTO
//!
//! 회원가입과 비밀번호 로그인은 같은 본문(`{ "email", "password" }`)을 받지만 검증 수준이 다릅니다.
//!
//! - 회원가입: 필수값 확인 → 이메일 형식/비밀번호 길이 검증 → 이메일 정규화
//! - 로그인: 필수값 확인 → 이메일 정규화 (형식이 틀린 이메일은 어차피 조회되지 않습니다)

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::core::errors::AppError;
use crate::utils::string_utils::{normalize_email, require_field, require_secret};

/// bcrypt는 72바이트까지만 해시에 반영합니다
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 이메일/비밀번호 요청 본문. 누락된 필드는 `None`으로 받아 `MissingField`로 보고합니다.
#[derive(Deserialize, Default)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// 필수값 확인과 정규화가 끝난 이메일/비밀번호
#[derive(Validate)]
pub struct Credentials {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "validate_password_bytes"))]
    pub password: String,
}

impl CredentialsRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    /// 회원가입용 검증
    ///
    /// # Errors
    ///
    /// * `AppError::MissingField` - email 또는 password 누락/공백
    /// * `AppError::ValidationError` - 이메일 형식 오류, 72바이트 초과 비밀번호
    pub fn into_registration(self) -> Result<Credentials, AppError> {
        let credentials = self.into_sign_in()?;

        credentials.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(credentials)
    }

    /// 로그인용 검증 (필수값만 확인)
    pub fn into_sign_in(self) -> Result<Credentials, AppError> {
        let email = require_field(self.email, "email")?;
        let password = require_secret(self.password, "password")?;

        Ok(Credentials {
            email: normalize_email(&email),
            password,
        })
    }
}

fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("비밀번호는 72바이트를 넘을 수 없습니다".into()));
    }
    Ok(())
}

/// `/api/auth/signin/google` 쿼리
#[derive(Debug, Deserialize, Default)]
pub struct SignInQuery {
    /// 로그인 후 돌아갈 경로
    #[serde(default, rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Google 콜백 쿼리
///
/// 사용자가 동의를 거부하면 `code`/`state` 대신 `error`가 옵니다.
#[derive(Debug, Deserialize, Default)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_requires_both_fields() {
        let missing_email = CredentialsRequest { email: None, password: Some("pw".to_string()) };
        assert!(matches!(missing_email.into_registration(), Err(AppError::MissingField(f)) if f == "email"));

        let blank_password = CredentialsRequest { email: Some("a@b.co".to_string()), password: Some(String::new()) };
        assert!(matches!(blank_password.into_registration(), Err(AppError::MissingField(f)) if f == "password"));
    }

    #[test]
    fn test_registration_rejects_malformed_email() {
        let request = CredentialsRequest::new("not-an-email", "secret123");
        assert!(matches!(request.into_registration(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_registration_rejects_overlong_password() {
        let request = CredentialsRequest::new("a@example.com", &"x".repeat(73));
        assert!(matches!(request.into_registration(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_registration_normalizes_email() {
        let credentials = CredentialsRequest::new("  Mixed@Example.COM", "secret123")
            .into_registration()
            .unwrap();
        assert_eq!(credentials.email, "mixed@example.com");
        assert_eq!(credentials.password, "secret123");
    }

    #[test]
    fn test_sign_in_keeps_password_verbatim() {
        let credentials = CredentialsRequest::new("a@example.com", " spaced ").into_sign_in().unwrap();
        assert_eq!(credentials.password, " spaced ");
    }

    #[test]
    fn test_missing_json_fields_deserialize_to_none() {
        let request: CredentialsRequest = serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert!(request.password.is_none());
    }
}
