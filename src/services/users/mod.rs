//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 비밀번호 검증, 외부 신원 연결, 프로필 조회를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일 중복 방지 (저장소 유니크 제약)
//! - 비밀번호 없는 외부 전용 계정은 비밀번호 로그인 불가

pub mod user_service;

pub use user_service::UserService;
