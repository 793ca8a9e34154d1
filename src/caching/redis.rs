//! # Redis 키-값 저장소 클라이언트
//!
//! 이 모듈은 Redis를 백엔드로 하는 키-값 클라이언트를 제공합니다.
//! 리프레시 토큰 레코드는 해시(HSET/HGETALL)로 저장되고, 수명은 전적으로
//! Redis의 TTL(EXPIRE) 메커니즘에 위임됩니다. 코어는 폴링이나 능동적
//! 퇴거를 수행하지 않습니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use crate::config::RedisConfig;

/// Redis 클라이언트 래퍼
///
/// Redis 서버와의 상호작용을 추상화하며, 리프레시 토큰 저장소가 필요로
/// 하는 해시/TTL 연산만을 노출합니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::caching::redis::RedisClient;
///
/// let redis = RedisClient::new().await?;
///
/// // 레코드 저장 (7일 TTL)
/// let fields = vec![
///     ("user_id".to_string(), user_id.to_string()),
///     ("issued_at".to_string(), now.to_string()),
/// ];
/// redis.hset_all("refresh_token:abc", &fields).await?;
/// redis.expire("refresh_token:abc", 7 * 24 * 3600).await?;
///
/// // 레코드 조회 (만료/부재 시 빈 맵)
/// let record = redis.hgetall("refresh_token:abc").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    /// 멀티플렉싱을 지원하는 Redis 클라이언트 인스턴스
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 서버 주소를 읽어오며, 설정되지 않은 경우
    /// 기본값 `redis://localhost:6379`를 사용합니다. 생성 시 PING 명령으로
    /// 서버 가용성을 확인합니다.
    ///
    /// ## 반환값
    ///
    /// - `Ok(RedisClient)` - 연결 성공 시 클라이언트 인스턴스
    /// - `Err(Box<dyn Error>)` - 연결 실패 또는 설정 오류
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = RedisConfig::url();

        let client = Client::open(redis_url)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        println!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 해시 키에 여러 필드를 한 번에 저장합니다.
    ///
    /// 기존 키가 있으면 필드를 덮어씁니다. TTL은 별도로 [`expire`]를
    /// 호출해야 설정됩니다.
    ///
    /// [`expire`]: RedisClient::expire
    pub async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.hset_multiple(key, fields).await
    }

    /// 해시 키의 모든 필드를 조회합니다.
    ///
    /// 키가 존재하지 않거나 TTL로 만료된 경우 빈 맵을 반환합니다.
    /// Redis는 부재와 만료를 구분하지 않으므로 호출자는 빈 맵을
    /// "유효하지 않거나 만료됨"으로 처리해야 합니다.
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.hgetall(key).await
    }

    /// 키의 TTL을 초 단위로 설정합니다.
    pub async fn expire(&self, key: &str, seconds: i64) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.expire(key, seconds).await
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 없어도 성공으로 처리됩니다 (멱등).
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    /// 키 존재 여부를 확인합니다.
    pub async fn exists(&self, key: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.exists(key).await
    }
}
