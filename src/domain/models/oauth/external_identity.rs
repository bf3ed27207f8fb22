//! 외부 프로바이더가 보증한 사용자 신원

use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::utils::string_utils::normalize_email;

/// 외부 프로바이더의 핸드셰이크가 끝난 뒤 전달되는 신원 단언
///
/// `subject`는 프로바이더 내부의 사용자 ID (Google의 `id`) 입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    pub provider: AuthProvider,
    pub email: String,
    pub subject: String,
}

impl ExternalIdentity {
    /// 이메일은 정규화하고 subject는 앞뒤 공백을 제거합니다.
    pub fn new(provider: AuthProvider, email: &str, subject: &str) -> Self {
        Self {
            provider,
            email: normalize_email(email),
            subject: subject.trim().to_string(),
        }
    }

    /// 사용할 수 있는 단언인지 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderAssertionInvalid` - 이메일이 비었거나 형식이 아님, subject가 비었음,
    ///   또는 외부 프로바이더가 아닌 provider
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.provider.is_external() {
            return Err(AppError::ProviderAssertionInvalid(
                format!("{} 는 외부 프로바이더가 아닙니다", self.provider.as_str())
            ));
        }

        if self.email.is_empty() || !self.email.contains('@') {
            return Err(AppError::ProviderAssertionInvalid(
                "프로바이더가 사용할 수 있는 이메일을 제공하지 않았습니다".to_string()
            ));
        }

        if self.subject.is_empty() {
            return Err(AppError::ProviderAssertionInvalid(
                "프로바이더 사용자 ID가 없습니다".to_string()
            ));
        }

        Ok(())
    }
}
