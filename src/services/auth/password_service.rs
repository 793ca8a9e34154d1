//! 비밀번호 해싱 서비스 구현
//!
//! bcrypt 기반의 단방향 비밀번호 해싱과 검증을 제공합니다.
//! 솔트는 해싱마다 무작위로 생성되며, 비교는 bcrypt 내부의
//! 상수 시간 비교를 사용합니다.

use singleton_macro::service;
use crate::config::PasswordConfig;
use crate::errors::errors::AppError;

/// 주어진 cost로 비밀번호를 해싱합니다.
///
/// # Errors
///
/// * `AppError::InternalError` - 엔트로피/리소스 문제로 해싱 자체가 실패한 경우
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
}

/// 저장된 해시에 대해 비밀번호를 검증합니다.
///
/// 불일치는 에러가 아니라 `Ok(false)`입니다. 해시 입력 자체가 손상된
/// 경우에만 에러를 반환합니다.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("malformed password hash: {}", e)))
}

/// 비밀번호 해싱 서비스
///
/// cost는 환경 설정(`BCRYPT_COST`, 기본 12)에서 읽습니다.
#[service(name = "password")]
pub struct PasswordService {
    // 외부 의존성 없음
}

impl PasswordService {
    /// 설정된 cost로 비밀번호를 해싱합니다.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password, PasswordConfig::bcrypt_cost())
    }

    /// 저장된 해시에 대해 비밀번호를 검증합니다.
    pub fn verify(&self, hash: &str, password: &str) -> Result<bool, AppError> {
        verify_password(hash, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 테스트에서는 낮은 cost로 실행 시간을 줄인다
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("longpassword1", TEST_COST).unwrap();

        assert!(verify_password(&hash, "longpassword1").unwrap());
        assert!(!verify_password(&hash, "wrongpass00").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("longpassword1", TEST_COST).unwrap();
        let second = hash_password("longpassword1", TEST_COST).unwrap();

        // 솔트가 무작위이므로 같은 입력이라도 해시는 다르다
        assert_ne!(first, second);
        assert!(verify_password(&first, "longpassword1").unwrap());
        assert!(verify_password(&second, "longpassword1").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error_not_false() {
        let result = verify_password("not-a-bcrypt-hash", "longpassword1");
        assert!(result.is_err());
    }
}
