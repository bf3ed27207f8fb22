//! # Application Error Handling System
//!
//! 인증 서비스 전체에서 사용하는 통합 에러 타입입니다.
//!
//! ## 에러 분류
//!
//! | 변형 | 의미 | HTTP 상태 |
//! |------|------|-----------|
//! | `MissingField` | 필수 입력 누락 | 400 |
//! | `ValidationError` | 형식이 잘못된 입력 | 400 |
//! | `AlreadyExists` | 이미 등록된 이메일 | 409 |
//! | `NotFound` | 해당 이메일/ID의 사용자 없음 | 401 |
//! | `InvalidCredential` | 비밀번호 불일치, 또는 비밀번호 없는 계정 | 401 |
//! | `ProviderAssertionInvalid` | 외부 프로바이더가 사용할 수 있는 이메일을 주지 않음 | 401 |
//! | `Unauthenticated` | 세션 토큰 없음/만료/위조, OAuth state 불일치 | 401 |
//! | `ExternalServiceError` | Google 등 외부 서비스 호출 실패 | 502 |
//! | `DatabaseError` | 저장소 오류 | 500 |
//! | `InternalError` | 그 밖의 내부 오류 | 500 |
//!
//! 로그인/회원가입 흐름에서 발생한 에러는 모두 "인증 실패"로 호출자에게 전달되며,
//! 어떤 단계에서도 재시도하지 않습니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "InvalidCredential", "message": "Invalid credential: 비밀번호가 일치하지 않습니다" }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Provider assertion invalid: {0}")]
    ProviderAssertionInvalid(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문과 리디렉션 쿼리(`/login?error=...`)에 쓰이는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "MissingField",
            AppError::ValidationError(_) => "ValidationError",
            AppError::AlreadyExists(_) => "AlreadyExists",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidCredential(_) => "InvalidCredential",
            AppError::ProviderAssertionInvalid(_) => "ProviderAssertionInvalid",
            AppError::Unauthenticated(_) => "Unauthenticated",
            AppError::ExternalServiceError(_) => "ExternalServiceError",
            AppError::DatabaseError(_) => "DatabaseError",
            AppError::InternalError(_) => "InternalError",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::NotFound(_)
            | AppError::InvalidCredential(_)
            | AppError::ProviderAssertionInvalid(_)
            | AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        // 내부 오류의 상세 내용은 로그에만 남깁니다
        let message = match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                log::error!("{}", self);
                "요청을 처리하는 중 서버 오류가 발생했습니다".to_string()
            }
            _ => self.to_string(),
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.code(),
                "message": message,
            }))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러를 `AppError::InternalError`로 감싸는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_client_errors_are_bad_request() {
        let missing = AppError::MissingField("email".to_string());
        let invalid = AppError::ValidationError("bad email".to_string());

        assert_eq!(missing.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        let error = AppError::AlreadyExists("a@b.c".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
        assert_eq!(error.code(), "AlreadyExists");
    }

    #[test]
    fn test_sign_in_failures_are_unauthorized() {
        for error in [
            AppError::NotFound("user".to_string()),
            AppError::InvalidCredential("password".to_string()),
            AppError::ProviderAssertionInvalid("email".to_string()),
            AppError::Unauthenticated("token".to_string()),
        ] {
            assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_external_service_error_is_bad_gateway() {
        let error = AppError::ExternalServiceError("google down".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
