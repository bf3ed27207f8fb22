//! User Entity Implementation
//!
//! 비밀번호 로그인과 Google 로그인을 모두 지원하는 통합 사용자 모델입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// - 비밀번호로 가입한 계정은 `password_hash`를 가집니다.
/// - Google 로그인으로 처음 생성된 계정은 `password_hash`가 없으며 비밀번호 로그인을 할 수 없습니다.
/// - 두 값이 모두 있으면 어느 쪽으로도 로그인할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 소문자로 정규화)
    pub email: String,
    /// bcrypt 해시 (Google 전용 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Google 사용자 ID (unique, sparse)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 비밀번호 회원가입으로 생성되는 사용자
    pub fn new_with_password(email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash: Some(password_hash),
            google_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 첫 Google 로그인으로 생성되는 사용자 (비밀번호 없음)
    pub fn new_external(email: String, google_id: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            password_hash: None,
            google_id: Some(google_id),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Google 계정이 연결되어 있는지 확인
    pub fn has_external_identity(&self) -> bool {
        self.google_id.is_some()
    }

    /// 외부 ID가 비어 있을 때만 연결합니다. 이미 연결된 ID는 바꾸지 않습니다.
    ///
    /// 실제로 값이 바뀌었으면 `true`를 반환합니다.
    pub fn attach_google_id(&mut self, google_id: &str) -> bool {
        if self.google_id.is_some() {
            return false;
        }
        self.google_id = Some(google_id.to_string());
        self.updated_at = DateTime::now();
        true
    }
}
