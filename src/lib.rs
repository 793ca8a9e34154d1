//! 인증 및 세션 생명주기 백엔드
//!
//! 다중 서비스 백엔드의 인증 코어입니다. 자격 증명 검증, 서명된 세션 토큰의
//! 발급/검증, Redis 기반 리프레시 토큰 레코드 관리, 그리고 이메일/비밀번호
//! 변경의 통제된 흐름을 제공합니다.
//!
//! # Features
//!
//! - **계정 등록/로그인**: 사용자명 또는 이메일 기반 로그인, bcrypt 해싱
//! - **JWT 인증**: HS512 서명의 액세스/리프레시 토큰 쌍, 타입 구분 클레임
//! - **세션 관리**: Redis TTL 기반 리프레시 토큰 레코드 (저장/검증/폐기)
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **PostgreSQL**: 사용자 디렉터리 영구 저장 (유니크 제약으로 경합 해소)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 검증 → 디렉터리 조회 → 해싱 → 토큰 발급
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ PostgreSQL+Redis │ ← 저장소
//! └──────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use auth_session_backend::services::auth::AuthService;
//! use tokio_util::sync::CancellationToken;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let auth_service = AuthService::instance();
//!
//! // 등록 후 로그인
//! let ct = CancellationToken::new();
//! auth_service.register(&ct, "alice", "alice@example.com", "longpassword1").await?;
//! let outcome = auth_service.login(&ct, "alice", "longpassword1").await?;
//! println!("access: {}", outcome.access_token);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
