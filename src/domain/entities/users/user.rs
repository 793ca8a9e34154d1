//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 사용자 레코드는 전적으로 사용자 디렉터리(PostgreSQL)가 소유하며,
//! 코어는 리포지토리 계약을 통해서만 읽고 씁니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// username과 email은 각각 전역 유일하며, 비교 전에 소문자로
/// 정규화됩니다. 유일성 자체는 users 테이블의 유니크 제약이 보장합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// 사용자 고유 식별자
    pub id: Uuid,
    /// 사용자명 (unique, 소문자 정규화)
    pub username: String,
    /// 사용자 이메일 (unique, 소문자 정규화)
    pub email: String,
    /// bcrypt 비밀번호 해시
    ///
    /// 코어는 이 값을 불투명한 문자열로만 다루며 직렬화 응답에는
    /// 절대 포함하지 않습니다.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 생성 시간
    pub created_at: DateTime<Utc>,
    /// 수정 시간
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// ID 문자열로 변환
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }
}
