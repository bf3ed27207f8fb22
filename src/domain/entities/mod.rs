//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 엔티티를 정의합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (MongoDB 문서)
//! ├── models/       ← 인증 모델 및 값 객체
//! └── dto/          ← HTTP 요청/응답 객체
//! ```

pub mod users;
