//! # MongoDB 사용자 리포지토리
//!
//! `users` 컬렉션에 대한 데이터 액세스를 담당합니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 옵션 |
//! |------|----|------|
//! | `email_unique` | `email: 1` | unique |
//! | `google_id_unique` | `google_id: 1` | unique, sparse |
//! | `created_at_desc` | `created_at: -1` | |
//!
//! 이메일 중복 검사는 애플리케이션이 아니라 유니크 인덱스가 최종적으로 보장합니다.
//! 중복 키 오류(11000)는 `AppError::AlreadyExists`로 변환됩니다.

use async_trait::async_trait;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::users::user::User;
use super::UserStore;

const COLLECTION_NAME: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 기반 사용자 리포지토리
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(COLLECTION_NAME),
        }
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 서버 시작 시 한 번 호출합니다. 이미 같은 정의의 인덱스가 있으면 아무 일도 하지 않습니다.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "google_id": 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("google_id_unique".to_string())
                    .build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build())
                .build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;

        info!("✅ users 컬렉션 인덱스 확인 완료");
        Ok(())
    }
}

/// 외부 ID 업서트 파이프라인
///
/// 한 `$set` 스테이지 안의 `$field` 참조는 모두 갱신 전 문서를 가리킵니다.
/// 이미 있는 값은 유지하고 비어 있는 값만 채우며, `updated_at`은 `google_id`를 새로 채울 때만 바뀝니다.
fn external_identity_pipeline(email: &str, google_id: &str, now: DateTime) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "email": { "$ifNull": ["$email", { "$literal": email }] },
            "google_id": { "$ifNull": ["$google_id", { "$literal": google_id }] },
            "created_at": { "$ifNull": ["$created_at", now] },
            "updated_at": {
                "$cond": [
                    { "$ifNull": ["$google_id", false] },
                    { "$ifNull": ["$updated_at", now] },
                    now,
                ]
            },
        }
    }]
}

struct LookupStep {
    filter: Document,
    upsert: bool,
}

/// 외부 ID 매칭 순서
///
/// 이메일이 일치하는 사용자가 항상 우선이고, 없을 때만 `google_id`로 찾거나 새로 만듭니다.
/// 이메일 사용자에게 다른 사용자의 `google_id`를 채우려 하면 유니크 인덱스가 막습니다.
fn external_identity_lookup(email: &str, google_id: &str) -> [LookupStep; 2] {
    [
        LookupStep { filter: doc! { "email": email }, upsert: false },
        LookupStep { filter: doc! { "google_id": google_id }, upsert: true },
    ]
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn map_write_error(err: MongoError, email: &str) -> AppError {
    if is_duplicate_key(&err) {
        AppError::AlreadyExists(format!("이미 등록된 사용자입니다: {}", email))
    } else {
        AppError::DatabaseError(err.to_string())
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            debug!("유효하지 않은 사용자 ID 형식: {}", id);
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("insert_one이 ObjectId를 반환하지 않았습니다".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    async fn upsert_external_identity(&self, email: &str, google_id: &str) -> Result<User, AppError> {
        for step in external_identity_lookup(email, google_id) {
            let user = self.collection
                .find_one_and_update(step.filter, external_identity_pipeline(email, google_id, DateTime::now()))
                .upsert(step.upsert)
                .return_document(ReturnDocument::After)
                .await
                .map_err(|e| map_write_error(e, email))?;

            if let Some(user) = user {
                return Ok(user);
            }
        }

        Err(AppError::DatabaseError("업서트 결과 문서가 없습니다".to_string()))
    }
}
