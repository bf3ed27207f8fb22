//! # 문자열 유틸리티
//!
//! 입력 정리와 검증에 쓰이는 공통 함수들입니다.

use crate::core::errors::AppError;

/// 이메일 정규화 (앞뒤 공백 제거 + 소문자)
///
/// 저장, 조회, 외부 프로바이더 이메일 비교 모두 이 함수를 거친 값을 사용합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::normalize_email;
///
/// assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
/// ```
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 필수 문자열 필드 검증 및 정리
///
/// 값이 없거나 공백뿐이면 `MissingField`, 그 외에는 앞뒤 공백을 제거한 값을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 값
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::require_field;
///
/// assert_eq!(require_field(Some("  Hello  ".to_string()), "name").unwrap(), "Hello");
/// assert!(require_field(Some("   ".to_string()), "name").is_err());
/// assert!(require_field(None, "name").is_err());
/// ```
pub fn require_field(value: Option<String>, field_name: &str) -> Result<String, AppError> {
    match clean_optional_string(value) {
        Some(v) => Ok(v),
        None => Err(AppError::MissingField(field_name.to_string())),
    }
}

/// 비밀번호처럼 원문을 그대로 써야 하는 필수 필드
///
/// 공백뿐인 값은 누락으로 보지만, 통과한 값은 trim하지 않습니다.
pub fn require_secret(value: Option<String>, field_name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if is_valid_string(&v) => Ok(v),
        _ => Err(AppError::MissingField(field_name.to_string())),
    }
}

/// 선택적 문자열 정리. 빈 문자열/공백뿐인 값은 `None`.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 로그인 후 돌아갈 경로 정리
///
/// 같은 사이트 안의 절대 경로(`/`로 시작, `//`로 시작하지 않음)만 허용하고
/// 그 밖의 값은 `/`로 바꿉니다. 외부 URL로의 오픈 리디렉트를 막습니다.
pub fn safe_callback_path(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("Alice@Example.com"), "alice@example.com");
        assert_eq!(normalize_email("  bob@example.com\n"), "bob@example.com");
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some("  World  ".to_string()), "name").unwrap(), "World");

        assert!(matches!(require_field(None, "email"), Err(AppError::MissingField(f)) if f == "email"));
        assert!(require_field(Some("".to_string()), "email").is_err());
        assert!(require_field(Some("\t\n".to_string()), "email").is_err());
    }

    #[test]
    fn test_require_secret_keeps_whitespace() {
        assert_eq!(require_secret(Some(" pw ".to_string()), "password").unwrap(), " pw ");
        assert!(require_secret(Some("   ".to_string()), "password").is_err());
        assert!(require_secret(None, "password").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_safe_callback_path() {
        assert_eq!(safe_callback_path(Some("/videos/42?t=10")), "/videos/42?t=10");
        assert_eq!(safe_callback_path(Some("https://evil.example")), "/");
        assert_eq!(safe_callback_path(Some("//evil.example")), "/");
        assert_eq!(safe_callback_path(Some("/\\evil.example")), "/");
        assert_eq!(safe_callback_path(None), "/");
    }
}
