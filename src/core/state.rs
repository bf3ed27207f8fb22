//! 애플리케이션 상태
//!
//! 서비스 인스턴스를 한곳에서 조립해 `web::Data<AppState>`로 핸들러에 공유합니다.
//! 모든 서비스는 생성 후 불변입니다.

use std::sync::Arc;
use log::{info, warn};
use crate::config::{
    DatabaseConfig, GoogleOAuthSettings, PasswordConfig, SessionSettings, UserStoreKind,
};
use crate::core::errors::AppError;
use crate::db::Database;
use crate::repositories::users::{InMemoryUserRepository, MongoUserRepository, UserStore};
use crate::services::auth::{GoogleAuthService, SessionService};
use crate::services::users::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub session_service: Arc<SessionService>,
    /// `GOOGLE_CLIENT_ID`/`GOOGLE_CLIENT_SECRET`이 없으면 `None`
    pub google: Option<Arc<GoogleAuthService>>,
}

impl AppState {
    /// 주어진 저장소와 설정으로 서비스 그래프를 조립합니다.
    pub fn new(
        store: Arc<dyn UserStore>,
        bcrypt_cost: u32,
        session_settings: SessionSettings,
        google_settings: Option<GoogleOAuthSettings>,
    ) -> Self {
        let user_service = Arc::new(UserService::new(store, bcrypt_cost));
        let session_service = Arc::new(SessionService::new(user_service.clone(), session_settings));
        let google = google_settings.map(|settings| Arc::new(GoogleAuthService::new(settings)));

        Self {
            user_service,
            session_service,
            google,
        }
    }

    /// 환경 변수로 저장소와 서비스를 초기화합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - MongoDB 연결 또는 인덱스 생성 실패
    pub async fn from_env() -> Result<Self, AppError> {
        let store: Arc<dyn UserStore> = match DatabaseConfig::user_store() {
            UserStoreKind::Mongo => {
                info!("📡 데이터베이스 연결 중...");
                let database = Database::new().await?;
                let repository = MongoUserRepository::new(&database);
                repository.ensure_indexes().await?;
                Arc::new(repository)
            }
            UserStoreKind::Memory => {
                warn!("⚠️ 메모리 사용자 저장소 사용 중 - 재시작하면 모든 계정이 사라집니다");
                Arc::new(InMemoryUserRepository::new())
            }
        };

        let session_settings = SessionSettings::from_env();
        let google_settings = GoogleOAuthSettings::from_env(&session_settings.secret);
        if google_settings.is_none() {
            info!("Google 로그인 비활성화 (GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET 미설정)");
        }

        Ok(Self::new(store, PasswordConfig::bcrypt_cost(), session_settings, google_settings))
    }
}

#[cfg(test)]
impl AppState {
    /// 메모리 저장소, bcrypt cost 4, 고정 비밀키로 조립한 테스트용 상태
    pub fn in_memory(google_settings: Option<GoogleOAuthSettings>) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            4,
            SessionSettings {
                secret: "test-session-secret".to_string(),
                max_age: chrono::Duration::days(30),
                update_age: chrono::Duration::hours(24),
                cookie_secure: false,
            },
            google_settings,
        )
    }
}
