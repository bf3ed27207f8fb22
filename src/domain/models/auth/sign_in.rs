//! 로그인 요청 모델
//!
//! 로그인 프로바이더 종류를 tagged variant로 표현합니다.
//! `SessionService::sign_in`이 변형별로 분기합니다.

use std::fmt;
use crate::config::AuthProvider;
use crate::domain::oauth::external_identity::ExternalIdentity;

pub enum SignInRequest {
    /// 이메일/비밀번호 로그인
    Credentials { email: String, password: String },

    /// 외부 프로바이더 핸드셰이크가 끝난 신원 단언
    External(ExternalIdentity),
}

impl SignInRequest {
    pub fn provider(&self) -> AuthProvider {
        match self {
            SignInRequest::Credentials { .. } => AuthProvider::Credentials,
            SignInRequest::External(identity) => identity.provider,
        }
    }

    /// 로그에 남길 수 있는 이메일
    pub fn email(&self) -> &str {
        match self {
            SignInRequest::Credentials { email, .. } => email,
            SignInRequest::External(identity) => &identity.email,
        }
    }
}

// 비밀번호가 로그에 찍히지 않도록 직접 구현
impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignInRequest::Credentials { email, .. } => f
                .debug_struct("Credentials")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            SignInRequest::External(identity) => f.debug_tuple("External").field(identity).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let request = SignInRequest::Credentials {
            email: "a@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", request);
        assert!(printed.contains("a@example.com"));
        assert!(!printed.contains("hunter2"));
        assert_eq!(request.provider(), AuthProvider::Credentials);
    }

    #[test]
    fn test_external_provider_kind() {
        let request = SignInRequest::External(
            ExternalIdentity::new(AuthProvider::Google, "a@example.com", "1")
        );
        assert_eq!(request.provider(), AuthProvider::Google);
        assert_eq!(request.email(), "a@example.com");
    }
}
