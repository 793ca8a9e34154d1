//! # 리프레시 토큰 저장소 리포지토리
//!
//! Redis를 사용하여 다음 기능을 제공합니다:
//! - 리프레시 토큰 레코드 저장 (불투명 핸들 키, 고정 TTL)
//! - 핸들 검증 (부재/만료 시 단일 에러)
//! - 명시적 폐기 (멱등)
//!
//! 레코드의 만료는 전적으로 Redis TTL에 위임됩니다. 백그라운드 정리나
//! 능동적 퇴거는 수행하지 않습니다.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::OnceCell;
use uuid::Uuid;
use crate::caching::redis::RedisClient;
use crate::config::JwtConfig;
use crate::core::registry::{Repository, RepositoryRegistration, ServiceLocator};
use crate::errors::errors::AppError;

/// Redis 키 접두사
const KEY_PREFIX: &str = "refresh_token";

/// 리프레시 토큰 레코드
///
/// 불투명 핸들(서명된 JWT가 아닌 무작위 UUID)을 키로 하는 최소 정보입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    /// 토큰을 발급받은 사용자 ID
    pub user_id: String,
    /// 발급 일시 (Unix timestamp)
    pub issued_at: i64,
}

impl RefreshTokenRecord {
    /// Redis 해시 필드 표현으로 변환합니다.
    fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("user_id".to_string(), self.user_id.clone()),
            ("issued_at".to_string(), self.issued_at.to_string()),
        ]
    }

    /// Redis 해시 필드에서 레코드를 복원합니다.
    ///
    /// 필드가 누락되었거나 형식이 잘못된 경우 `None`을 반환합니다.
    fn from_fields(fields: &HashMap<String, String>) -> Option<Self> {
        let user_id = fields.get("user_id")?.clone();
        let issued_at = fields.get("issued_at")?.parse().ok()?;

        Some(Self { user_id, issued_at })
    }
}

/// 리프레시 토큰 저장소
pub struct TokenRepository {
    /// Redis 클라이언트
    redis: Arc<RedisClient>,
}

static TOKEN_REPOSITORY_INSTANCE: OnceCell<Arc<TokenRepository>> = OnceCell::new();

impl TokenRepository {
    /// 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        TOKEN_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new()))
            .clone()
    }

    fn new() -> Self {
        Self {
            redis: ServiceLocator::get::<RedisClient>(),
        }
    }

    fn key(handle: &str) -> String {
        format!("{}:{}", KEY_PREFIX, handle)
    }

    /// 새 리프레시 토큰 레코드를 저장하고 핸들을 반환합니다.
    ///
    /// 핸들은 무작위 UUIDv4이며 서명된 리프레시 토큰과는 별개의 값입니다.
    /// TTL은 리프레시 토큰 유효 기간(기본 7일)과 동일하게 설정됩니다.
    ///
    /// # 에러
    ///
    /// * `RedisError` - 저장소 I/O 실패
    pub async fn store(&self, user_id: Uuid) -> Result<String, AppError> {
        let handle = Uuid::new_v4().to_string();
        let key = Self::key(&handle);

        let record = RefreshTokenRecord {
            user_id: user_id.to_string(),
            issued_at: Utc::now().timestamp(),
        };

        let ttl = JwtConfig::refresh_ttl_seconds();

        self.redis
            .hset_all(&key, &record.to_fields())
            .await
            .map_err(|e| AppError::RedisError(format!("refresh token store unavailable: {}", e)))?;

        self.redis
            .expire(&key, ttl)
            .await
            .map_err(|e| AppError::RedisError(format!("refresh token store unavailable: {}", e)))?;

        log::info!("리프레시 토큰 레코드 저장 - user_id: {}, ttl: {}초", user_id, ttl);

        Ok(handle)
    }

    /// 핸들을 검증하고 저장된 레코드를 반환합니다.
    ///
    /// # 에러
    ///
    /// * `AuthenticationError` - 키 부재 (TTL 만료 포함) 또는 빈 레코드
    /// * `RedisError` - 저장소 I/O 실패
    pub async fn verify(&self, handle: &str) -> Result<RefreshTokenRecord, AppError> {
        let key = Self::key(handle);

        let fields = self
            .redis
            .hgetall(&key)
            .await
            .map_err(|e| AppError::RedisError(format!("refresh token store unavailable: {}", e)))?;

        if fields.is_empty() {
            return Err(AppError::AuthenticationError(
                "invalid or expired refresh token".to_string(),
            ));
        }

        RefreshTokenRecord::from_fields(&fields).ok_or_else(|| {
            AppError::InternalError("malformed refresh token record".to_string())
        })
    }

    /// 핸들을 폐기합니다.
    ///
    /// 이미 없는 키를 삭제해도 에러가 아닙니다 (멱등).
    pub async fn revoke(&self, handle: &str) -> Result<(), AppError> {
        let key = Self::key(handle);

        self.redis
            .del(&key)
            .await
            .map_err(|e| AppError::RedisError(format!("refresh token store unavailable: {}", e)))?;

        log::info!("리프레시 토큰 레코드 폐기 - handle: {}", handle);
        Ok(())
    }
}

#[async_trait]
impl Repository for TokenRepository {
    fn name(&self) -> &str {
        "token_repository"
    }

    fn collection_name(&self) -> &str {
        KEY_PREFIX
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// 리포지토리 레지스트리 생성자 함수
fn token_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(TokenRepository::instance())
}

inventory::submit! {
    RepositoryRegistration {
        name: "token_repository",
        constructor: token_repository_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_roundtrip() {
        let record = RefreshTokenRecord {
            user_id: "8e5657d2-5a2f-4f3b-9f6a-2f4ed1bafc5a".to_string(),
            issued_at: 1_700_000_000,
        };

        let fields: HashMap<String, String> = record.to_fields().into_iter().collect();
        let restored = RefreshTokenRecord::from_fields(&fields).unwrap();

        assert_eq!(restored, record);
    }

    #[test]
    fn test_record_from_incomplete_fields() {
        let mut fields = HashMap::new();
        fields.insert("user_id".to_string(), "abc".to_string());
        // issued_at 누락
        assert!(RefreshTokenRecord::from_fields(&fields).is_none());

        fields.insert("issued_at".to_string(), "not-a-number".to_string());
        assert!(RefreshTokenRecord::from_fields(&fields).is_none());
    }

    #[test]
    fn test_key_format() {
        assert_eq!(TokenRepository::key("abc"), "refresh_token:abc");
    }
}
