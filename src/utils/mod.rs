//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 문자열 검증, 이메일 정규화, 리디렉트 경로 정리

pub mod string_utils;
