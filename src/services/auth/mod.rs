//! 인증 서비스 모듈

pub mod auth_service;
pub mod password_service;
pub mod token_service;

pub use auth_service::*;
pub use password_service::*;
pub use token_service::*;
