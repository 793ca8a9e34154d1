//! 인증 응답 DTO
//!
//! 민감 정보(비밀번호 해시)를 제거한 형태로 클라이언트에게 전달되는
//! 응답 데이터 구조를 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::entities::users::User;

/// 로그인 성공 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 액세스 토큰 (단기)
    pub access_token: String,
    /// 리프레시 토큰 (장기)
    pub refresh_token: String,
    /// 리프레시 토큰 저장소 핸들 (갱신/로그아웃 시 제시)
    pub refresh_handle: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}

/// 단순 메시지 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 사용자 정보 응답 DTO
///
/// 엔티티에서 비밀번호 해시를 제거한 공개 프로필 형태입니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
