//! # Data & Runtime Configuration
//!
//! 실행 환경, 비밀번호 해싱 비용, 서버 바인딩, 데이터 저장소 선택 등
//! 인증 흐름 바깥의 런타임 설정을 환경 변수에서 읽어옵니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="development"   # development | test | staging | production
//! export BCRYPT_COST="10"            # 4..=15, 미설정 시 환경별 기본값
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="vidshare_dev"
//! export USER_STORE="mongo"          # mongo | memory
//! ```

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로부터 현재 실행 환경을 결정합니다.
    ///
    /// 값이 없거나 알 수 없는 값이면 가장 보수적인 `Production`으로 간주합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 비밀번호 해싱 설정
///
/// bcrypt cost는 해시 한 번에 드는 시간을 2^cost 배로 늘립니다.
/// 개발/테스트에서는 빠른 값을, 운영에서는 느린 값을 사용합니다.
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`가 4..=15 범위로 설정되어 있으면 그 값을, 아니면 환경별 기본값을 반환합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
                log::warn!("BCRYPT_COST={} 는 허용 범위(4-15)를 벗어납니다. 환경 기본값 사용", cost);
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 사용자 저장소 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum UserStoreKind {
    /// MongoDB `users` 컬렉션
    Mongo,
    /// 프로세스 메모리 (재시작 시 모든 계정이 사라집니다)
    Memory,
}

/// 문서 데이터베이스 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "vidshare_dev".to_string())
    }

    pub fn user_store() -> UserStoreKind {
        Self::user_store_from_str(&env::var("USER_STORE").unwrap_or_default())
    }

    pub fn user_store_from_str(s: &str) -> UserStoreKind {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => UserStoreKind::Memory,
            _ => UserStoreKind::Mongo,
        }
    }
}

/// CORS 허용 오리진 설정
pub struct CorsConfig;

impl CorsConfig {
    /// 쉼표로 구분된 `CORS_ALLOWED_ORIGINS` 목록 (기본값: `http://localhost:3000`)
    pub fn allowed_origins() -> Vec<String> {
        Self::parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        )
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

/// Rate Limiting 설정
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND` (기본 100), `RATE_LIMIT_BURST_SIZE` (기본 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}
