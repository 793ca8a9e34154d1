//! 데이터 액세스 리포지토리 모듈

pub mod users;
pub mod tokens;
