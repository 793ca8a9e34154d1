//! 미들웨어 모듈

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::{AuthMiddleware, AuthMode};
