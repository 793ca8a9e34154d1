//! JWT 세션 토큰의 클레임 구조체와 토큰 쌍
//!
//! RFC 7519 JWT 표준 클레임에 액세스/리프레시 용도 구분자(`typ`)를 더한
//! 명시적 타입 구조를 정의합니다. 느슨한 키/값 맵 대신 타입이 지정된
//! 구조체를 사용하므로 모든 파싱 경로에서 `typ` 확인이 강제됩니다.

use serde::{Deserialize, Serialize};

/// 토큰 용도 구분자 (`typ` 클레임)
///
/// 와이어 표현은 `"access"` / `"refresh"` 소문자 문자열입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// 단일 요청 윈도우 동안 신원을 증명하는 단기 토큰
    Access,
    /// 재인증 없이 새 액세스 토큰을 얻기 위한 장기 토큰
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT 세션 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 UUID 문자열)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
/// - `jti`: 토큰 인스턴스 고유 식별자 (UUID 문자열, 발급마다 새로 생성)
/// - `typ`: 용도 구분자 (`access` | `refresh`)
///
/// `sub`는 서명이 유효하더라도 페이로드에 없을 수 있으므로 `Option`으로
/// 표현하고, 검증 계층에서 부재를 별도 에러로 표면화합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 토큰의 주체 (사용자 UUID 문자열)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 토큰 인스턴스 고유 식별자
    pub jti: String,
    /// 용도 구분자
    pub typ: TokenKind,
}

/// 서명된 토큰 쌍
///
/// 로그인 성공 시 클라이언트에게 전달되는 토큰 집합입니다.
/// 두 토큰 모두 발급 후 불변이며, 새 로그인은 항상 새로운 `jti`를 가진
/// 새 쌍을 생성합니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_wire_format() {
        assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), "\"access\"");
        assert_eq!(serde_json::to_string(&TokenKind::Refresh).unwrap(), "\"refresh\"");

        let kind: TokenKind = serde_json::from_str("\"refresh\"").unwrap();
        assert_eq!(kind, TokenKind::Refresh);
    }

    #[test]
    fn test_token_kind_rejects_unknown() {
        assert!(serde_json::from_str::<TokenKind>("\"session\"").is_err());
    }

    #[test]
    fn test_claims_roundtrip() {
        let claims = SessionClaims {
            sub: Some("8e5657d2-5a2f-4f3b-9f6a-2f4ed1bafc5a".to_string()),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
            jti: "c0b1a6de-5c3f-4f5f-8c2a-7a1f2e3d4c5b".to_string(),
            typ: TokenKind::Access,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let parsed: SessionClaims = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.jti, claims.jti);
        assert_eq!(parsed.typ, TokenKind::Access);
    }

    #[test]
    fn test_claims_without_subject_deserialize() {
        // 주체 없는 페이로드도 역직렬화는 되어야 하며,
        // 부재 처리는 검증 계층의 몫이다.
        let json = r#"{"iat":1,"exp":2,"jti":"x","typ":"access"}"#;
        let parsed: SessionClaims = serde_json::from_str(json).unwrap();
        assert!(parsed.sub.is_none());
    }
}
