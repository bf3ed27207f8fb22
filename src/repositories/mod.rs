//! 데이터 액세스 계층
//!
//! 서비스는 `Arc<dyn UserStore>`로 저장소를 주입받습니다.
//! 운영 환경은 MongoDB, 테스트와 로컬 개발은 메모리 구현을 사용합니다.

pub mod users;
