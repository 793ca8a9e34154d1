//! # 사용자 디렉터리 리포지토리
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다. PostgreSQL `users` 테이블에
//! 대한 모든 조회/변경이 이 리포지토리를 통해 수행됩니다.
//!
//! ## 유일성 보장
//!
//! username/email의 전역 유일성은 테이블의 유니크 제약이 보장합니다.
//! 가용성 검사를 통과한 뒤 동시 등록이 먼저 커밋된 경우, INSERT는
//! 23505(unique_violation)로 실패하고 충돌 에러로 변환됩니다.
//! 일반 I/O 에러로 뭉개지지 않습니다.

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use uuid::Uuid;
use crate::{
    core::registry::{Repository, RepositoryRegistration, ServiceLocator},
    db::Database,
    domain::entities::users::User,
    utils::credentials::IdentifierKind,
};
use crate::errors::errors::AppError;

/// PostgreSQL unique_violation 에러 코드
const UNIQUE_VIOLATION: &str = "23505";

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 레코드의 소유권은 전적으로 이 리포지토리 뒤의 디렉터리에
/// 있으며, 서비스 계층은 여기 노출된 계약을 통해서만 접근합니다.
pub struct UserRepository {
    /// PostgreSQL 연결 풀
    db: Arc<Database>,
}

static USER_REPOSITORY_INSTANCE: OnceCell<Arc<UserRepository>> = OnceCell::new();

impl UserRepository {
    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        USER_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new()))
            .clone()
    }

    fn new() -> Self {
        Self {
            db: ServiceLocator::get::<Database>(),
        }
    }

    /// 새 사용자 레코드를 저장합니다.
    ///
    /// # 에러
    ///
    /// * `ConflictError` - 유니크 제약 위반 (동시 등록 경합 포함)
    /// * `DatabaseError` - 기타 저장소 오류
    pub async fn save_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(self.db.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(AppError::ConflictError("user already exists".to_string()))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    /// 분류된 식별자(사용자명 또는 이메일)로 사용자를 조회합니다.
    ///
    /// 조회 컬럼은 `IdentifierKind`에 의해 정적으로 결정됩니다.
    /// 입력값이 쿼리 텍스트에 섞이는 일은 없습니다.
    pub async fn find_by_identifier(
        &self,
        kind: IdentifierKind,
        value: &str,
    ) -> Result<Option<User>, AppError> {
        let query = match kind {
            IdentifierKind::Email => {
                "SELECT id, username, email, password_hash, created_at, updated_at \
                 FROM users WHERE email = $1"
            }
            IdentifierKind::Username => {
                "SELECT id, username, email, password_hash, created_at, updated_at \
                 FROM users WHERE username = $1"
            }
        };

        sqlx::query_as::<_, User>(query)
            .bind(value)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자를 조회합니다.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자명 가용성 검사
    ///
    /// 해당 사용자명을 가진 레코드가 없으면 `true`를 반환합니다.
    pub async fn username_available(&self, username: &str) -> Result<bool, AppError> {
        let existing = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(existing.is_none())
    }

    /// 이메일 가용성 검사
    pub async fn email_available(&self, email: &str) -> Result<bool, AppError> {
        let existing = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(existing.is_none())
    }

    /// 사용자의 현재 이메일이 주어진 값과 일치하는지 확인합니다.
    ///
    /// # 에러
    ///
    /// * `NotFound` - 해당 (user_id, email) 조합의 레코드가 없음.
    ///   사용자 부재와 이메일 불일치는 의도적으로 구분하지 않습니다.
    pub async fn confirm_email(&self, user_id: Uuid, email: &str) -> Result<(), AppError> {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT email FROM users WHERE id = $1 AND email = $2",
        )
        .bind(user_id)
        .bind(email)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match row {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("wrong email".to_string())),
        }
    }

    /// 사용자 ID만으로 저장된 비밀번호 해시를 조회합니다.
    ///
    /// 해시 비교는 호출자가 Password Hasher로 수행합니다.
    /// 비밀번호 값이 쿼리 조건으로 쓰이는 일은 없습니다.
    pub async fn password_hash_by_id(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT password_hash FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(|(hash,)| hash))
    }

    /// 사용자의 이메일을 변경합니다.
    pub async fn update_email(&self, user_id: Uuid, email: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET email = $2, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(email)
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 사용자의 비밀번호 해시를 변경합니다.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepository {
    fn name(&self) -> &str {
        "user_repository"
    }

    fn collection_name(&self) -> &str {
        "users"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// 리포지토리 레지스트리 생성자 함수
fn user_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(UserRepository::instance())
}

inventory::submit! {
    RepositoryRegistration {
        name: "user_repository",
        constructor: user_repository_constructor,
    }
}
