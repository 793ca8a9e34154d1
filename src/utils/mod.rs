//! 공통 유틸리티 모듈

pub mod credentials;
pub mod display_terminal;
