//! HTTP 경계 DTO 모듈

pub mod auth;

pub use auth::*;
