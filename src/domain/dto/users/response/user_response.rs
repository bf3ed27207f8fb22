use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

/// 사용자 요약 정보 (`id`, `email`). 비밀번호 해시는 절대 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
        }
    }
}

/// 회원가입 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

/// `/api/me` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub email: String,
    pub has_password: bool,
    pub google_linked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            has_password: user.can_authenticate_with_password(),
            google_linked: user.has_external_identity(),
            email: user.email,
            created_at: to_utc(user.created_at),
            updated_at: to_utc(user.updated_at),
        }
    }
}

fn to_utc(value: mongodb::bson::DateTime) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
