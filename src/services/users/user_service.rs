//! 사용자 조회 서비스 구현
//!
//! 인증된 요청을 위한 사용자 프로필 조회를 담당합니다.
//! 엔티티를 DTO로 변환하여 비밀번호 해시가 응답에 노출되지 않도록 합니다.

use std::sync::Arc;
use singleton_macro::service;
use uuid::Uuid;
use crate::domain::dto::auth::UserResponse;
use crate::errors::errors::AppError;
use crate::repositories::users::UserRepository;

/// 사용자 조회 서비스
#[service(name = "user")]
pub struct UserService {
    /// 사용자 디렉터리 리포지토리
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// ID로 사용자를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 해당 ID의 사용자가 존재하지 않음
    /// * `AppError::DatabaseError` - 디렉터리 조회 오류
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
