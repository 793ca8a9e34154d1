//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰 쌍의 생성과 검증을 담당합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use std::sync::Arc;
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::domain::models::token::{SessionClaims, TokenKind, TokenPair};
use crate::errors::errors::AppError;

/// HS512 서명기
///
/// 기동 시점에 설정에서 한 번 구성되는 불변 값입니다. 서명 시크릿은
/// 인코딩/디코딩 키로 변환되어 보관되며, 이후 변경되지 않습니다.
/// 두 토큰 모두 동일한 키와 알고리즘을 사용하고 만료 기간만 다릅니다.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenSigner {
    /// 시크릿과 만료 기간으로 서명기를 생성합니다.
    pub fn new(secret: &str, access_minutes: i64, refresh_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_minutes),
            refresh_ttl: Duration::days(refresh_days),
        }
    }

    /// 환경 설정에서 서명기를 구성합니다.
    ///
    /// # Panics
    ///
    /// `JWT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn from_env() -> Self {
        Self::new(
            &JwtConfig::secret(),
            JwtConfig::access_expiration_minutes(),
            JwtConfig::refresh_expiration_days(),
        )
    }

    /// 사용자를 위한 액세스/리프레시 토큰 쌍을 발급합니다.
    ///
    /// 두 토큰은 독립적으로 새 `jti`(UUID)를 부여받으며, `typ` 클레임으로
    /// 용도가 구분됩니다. 발급된 토큰은 불변입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        let now = Utc::now();

        let access_claims = SessionClaims {
            sub: Some(user_id.to_string()),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ: TokenKind::Access,
        };

        let refresh_claims = SessionClaims {
            sub: Some(user_id.to_string()),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ: TokenKind::Refresh,
        };

        let header = Header::new(Algorithm::HS512);

        let access_token = encode(&header, &access_claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("토큰 서명 실패: {}", e)))?;

        let refresh_token = encode(&header, &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("토큰 서명 실패: {}", e)))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 토큰을 검증하고 클레임을 반환합니다.
    ///
    /// HS512 이외의 알고리즘(`none`, 비대칭 서명 포함)으로 선언된 토큰은
    /// 서명이 무엇이든 거부됩니다. 서명 불일치, 구조 손상, 만료는 모두
    /// 동일한 invalid-token 에러로 표면화됩니다. 서명이 유효하지만 `sub`
    /// 클레임이 없는 토큰은 별도의 missing-subject 에러로 구분됩니다.
    ///
    /// 액세스/리프레시 구분은 이 함수가 하지 않습니다. 호출자가 반환된
    /// 클레임의 `typ`을 명시적으로 확인해야 합니다.
    pub fn parse(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::new(Algorithm::HS512);

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::AuthenticationError("invalid token".to_string()))?;

        if claims.sub.is_none() {
            return Err(AppError::AuthenticationError("token is missing subject".to_string()));
        }

        Ok(claims)
    }

    /// 토큰을 검증하고 주체 UUID와 용도 구분자를 반환합니다.
    pub fn parse_subject(&self, token: &str) -> Result<(Uuid, TokenKind), AppError> {
        let claims = self.parse(token)?;

        // parse()가 sub 존재를 보장한다
        let sub = claims.sub.as_deref().unwrap_or_default();
        let user_id = Uuid::parse_str(sub)
            .map_err(|_| AppError::AuthenticationError("invalid subject in token".to_string()))?;

        Ok((user_id, claims.typ))
    }
}

/// JWT 토큰 관리 서비스
///
/// 싱글톤으로 관리되며, 기동 시점에 등록된 [`TokenSigner`]를 통해
/// 토큰 발급/검증을 수행합니다.
#[service(name = "token")]
pub struct TokenService {
    /// 불변 서명기 (main에서 구성되어 레지스트리에 등록됨)
    signer: Arc<TokenSigner>,
}

impl TokenService {
    /// 사용자를 위한 토큰 쌍을 발급합니다.
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        self.signer.issue_pair(user_id)
    }

    /// 토큰을 검증하고 클레임을 반환합니다.
    pub fn parse(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.signer.parse(token)
    }

    /// 토큰을 검증하고 주체와 용도 구분자를 반환합니다.
    pub fn parse_subject(&self, token: &str) -> Result<(Uuid, TokenKind), AppError> {
        self.signer.parse_subject(token)
    }
}

/// Bearer 토큰에서 실제 토큰 부분을 추출합니다.
///
/// HTTP Authorization 헤더의 "Bearer {token}" 형식에서
/// 토큰 부분만을 추출합니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    if auth_header.starts_with("Bearer ") {
        Ok(&auth_header[7..])
    } else {
        Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", 15, 7)
    }

    #[test]
    fn test_issue_and_parse_roundtrip() {
        let signer = signer();
        let user_id = Uuid::new_v4();

        let pair = signer.issue_pair(user_id).unwrap();

        // 컴팩트 JWS: 점으로 구분된 세 세그먼트
        assert_eq!(pair.access_token.split('.').count(), 3);
        assert_eq!(pair.refresh_token.split('.').count(), 3);

        let (access_sub, access_kind) = signer.parse_subject(&pair.access_token).unwrap();
        let (refresh_sub, refresh_kind) = signer.parse_subject(&pair.refresh_token).unwrap();

        assert_eq!(access_sub, user_id);
        assert_eq!(refresh_sub, user_id);
        assert_eq!(access_kind, TokenKind::Access);
        assert_eq!(refresh_kind, TokenKind::Refresh);
    }

    #[test]
    fn test_jti_unique_per_token_and_per_issuance() {
        let signer = signer();
        let user_id = Uuid::new_v4();

        let first = signer.issue_pair(user_id).unwrap();
        let second = signer.issue_pair(user_id).unwrap();

        let jti = |token: &str| signer.parse(token).unwrap().jti;

        // 같은 쌍 안에서도, 발급 간에도 jti는 모두 다르다
        let ids = [
            jti(&first.access_token),
            jti(&first.refresh_token),
            jti(&second.access_token),
            jti(&second.refresh_token),
        ];
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                assert_ne!(ids[i], ids[j]);
            }
        }
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let signer = signer();
        let pair = signer.issue_pair(Uuid::new_v4()).unwrap();

        let mut tampered = pair.access_token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(signer.parse(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // 서명은 유효하지만 만료 시점이 과거인 토큰
        let expired_signer = TokenSigner::new("test-secret", -5, -1);
        let pair = expired_signer.issue_pair(Uuid::new_v4()).unwrap();

        assert!(expired_signer.parse(&pair.access_token).is_err());
        assert!(expired_signer.parse(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        // 같은 시크릿이라도 HS512가 아닌 알고리즘으로 서명된 토큰은 거부
        let claims = SessionClaims {
            sub: Some(Uuid::new_v4().to_string()),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ: TokenKind::Access,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(signer().parse(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = signer().issue_pair(Uuid::new_v4()).unwrap();
        let other = TokenSigner::new("another-secret", 15, 7);

        assert!(other.parse(&pair.access_token).is_err());
    }

    #[test]
    fn test_missing_subject_rejected() {
        #[derive(Serialize)]
        struct NoSubjectClaims {
            iat: i64,
            exp: i64,
            jti: String,
            typ: TokenKind,
        }

        let claims = NoSubjectClaims {
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ: TokenKind::Access,
        };

        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        match signer().parse(&token) {
            Err(AppError::AuthenticationError(msg)) => {
                assert!(msg.contains("missing subject"));
            }
            other => panic!("Expected missing-subject error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("abc.def.ghi").is_err());
    }

    #[test]
    fn test_invalid_subject_uuid_rejected() {
        let claims = SessionClaims {
            sub: Some("not-a-uuid".to_string()),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ: TokenKind::Access,
        };

        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(signer().parse_subject(&token).is_err());
    }
}
