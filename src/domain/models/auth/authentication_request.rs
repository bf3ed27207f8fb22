//! 라우트 가드 정책 모델

/// 요청 경로에 적용되는 인증 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 세션이 없으면 로그인 페이지로 리디렉션
    Required,
    /// 유효한 세션이 있으면 사용자 정보를 붙이고, 없어도 통과
    Optional,
}

/// 세션 없이 접근할 수 있는 경로 목록
///
/// `exact`는 경로 전체가 일치해야 하고, `prefixes`는 접두사로 비교합니다.
#[derive(Debug, Clone)]
pub struct PublicPaths {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl PublicPaths {
    pub fn new(exact: &[&str], prefixes: &[&str]) -> Self {
        Self {
            exact: exact.iter().map(|s| s.to_string()).collect(),
            prefixes: prefixes.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.exact.iter().any(|p| p == path)
            || self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    pub fn mode_for(&self, path: &str) -> AuthMode {
        if self.is_public(path) {
            AuthMode::Optional
        } else {
            AuthMode::Required
        }
    }
}

impl Default for PublicPaths {
    /// 로그인/회원가입 화면, 인증 API, 헬스체크, 정적 자원
    fn default() -> Self {
        Self::new(
            &["/", "/health", "/login", "/register", "/error", "/favicon.ico"],
            &["/api/auth/", "/public/", "/_next/"],
        )
    }
}
