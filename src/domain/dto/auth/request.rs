//! 인증 요청 DTO
//!
//! HTTP 경계에서 역직렬화되는 요청 데이터 구조를 정의합니다.
//! 여기서의 검증은 명백히 잘못된 요청을 조기에 거르는 1차 방어이며,
//! 순서가 보장되는 권위 있는 검증은 서비스 계층의 자격 증명 검증기가
//! 수행합니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 계정 등록 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 사용자명 (최소 3자)
    #[validate(length(min = 3, message = "사용자명은 최소 3자 이상이어야 합니다"))]
    pub username: String,

    /// 사용자 이메일 주소
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 계정 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 요청 DTO
///
/// `identifier`는 사용자명 또는 이메일일 수 있으므로
/// 이메일 형식 검증을 적용하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// 로그인 식별자 (사용자명 또는 이메일, 최소 3자)
    #[validate(length(min = 3, message = "식별자는 최소 3자 이상이어야 합니다"))]
    pub identifier: String,

    /// 계정 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 이메일 변경 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    /// 대상 사용자 ID
    pub user_id: Uuid,

    /// 현재 등록된 이메일
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub old_email: String,

    /// 새로 등록할 이메일
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub new_email: String,
}

/// 비밀번호 변경 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    /// 대상 사용자 ID
    pub user_id: Uuid,

    /// 현재 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub old_password: String,

    /// 새 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub new_password: String,
}

/// 토큰 갱신 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// 서명된 리프레시 토큰
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,

    /// 저장소 핸들 (로그인 시 발급된 불투명 키)
    #[validate(length(min = 1, message = "리프레시 핸들이 필요합니다"))]
    pub refresh_handle: String,
}

/// 로그아웃 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    /// 폐기할 저장소 핸들
    #[validate(length(min = 1, message = "리프레시 핸들이 필요합니다"))]
    pub refresh_handle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "longpassword1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_username = RegisterRequest {
            username: "al".to_string(),
            ..valid.clone()
        };
        assert!(short_username.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_allows_username_identifier() {
        // 식별자는 이메일이 아니어도 유효하다
        let req = LoginRequest {
            identifier: "alice".to_string(),
            password: "longpassword1".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
