//! # 자격 증명 검증 유틸리티
//!
//! I/O 이전에 수행되는 순수 검증 함수들입니다. 검증은 고정된 순서로
//! 실행되며 첫 실패에서 즉시 반환합니다 (빈 필드 → 이메일 형식 →
//! 로그인 길이 → 비밀번호 길이). 모든 실패는 `ValidationError`로
//! 표면화되고, 어떤 경우에도 저장소 접근이 일어나지 않습니다.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::errors::errors::AppError;

/// 이메일 형식 패턴
///
/// 대소문자 무시. 국제화 도메인(IDN)은 허용하지 않습니다.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$")
        .expect("invalid email pattern")
});

/// 로그인 식별자의 분류 결과
///
/// 사용자 디렉터리가 어떤 컬럼을 조회할지 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Username,
}

impl IdentifierKind {
    /// 디렉터리 조회에 사용할 컬럼 이름을 반환합니다.
    pub fn column(&self) -> &'static str {
        match self {
            IdentifierKind::Email => "email",
            IdentifierKind::Username => "username",
        }
    }
}

/// 이메일 형식 검사
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 등록 입력값 검증
///
/// 고정 순서: 빈 필드 → 이메일 형식 → 로그인 길이(≥3) → 비밀번호 길이(≥8).
/// 첫 실패에서 단락 평가됩니다.
pub fn validate_registration(login: &str, email: &str, password: &str) -> Result<(), AppError> {
    if login.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::ValidationError("all fields must be filled".to_string()));
    }

    if !is_valid_email(email) {
        return Err(AppError::ValidationError("email is invalid".to_string()));
    }

    if login.chars().count() < 3 {
        return Err(AppError::ValidationError("login must be at least 3 characters".to_string()));
    }

    if password.chars().count() < 8 {
        return Err(AppError::ValidationError("password must be at least 8 characters".to_string()));
    }

    Ok(())
}

/// 로그인 입력값 검증
///
/// 식별자는 사용자명일 수 있으므로 이메일 형식은 요구하지 않습니다.
pub fn validate_login(identifier: &str, password: &str) -> Result<(), AppError> {
    if identifier.is_empty() || password.is_empty() {
        return Err(AppError::ValidationError("all fields must be filled".to_string()));
    }

    if identifier.chars().count() < 3 {
        return Err(AppError::ValidationError("login must be at least 3 characters".to_string()));
    }

    if password.chars().count() < 8 {
        return Err(AppError::ValidationError("password must be at least 8 characters".to_string()));
    }

    Ok(())
}

/// 비밀번호 변경의 순수 전제 조건 검증
///
/// 두 비밀번호 모두 8자 이상이어야 하고, 이전 비밀번호와 새 비밀번호가
/// 같으면 길이와 무관하게 거부됩니다.
pub fn validate_password_change(old_password: &str, new_password: &str) -> Result<(), AppError> {
    if old_password.chars().count() < 8 || new_password.chars().count() < 8 {
        return Err(AppError::ValidationError("password must be at least 8 characters".to_string()));
    }

    if old_password == new_password {
        return Err(AppError::ValidationError("new password must differ from the old one".to_string()));
    }

    Ok(())
}

/// 로그인 식별자를 이메일 또는 사용자명으로 분류합니다
pub fn classify_identifier(identifier: &str) -> IdentifierKind {
    if is_valid_email(identifier) {
        IdentifierKind::Email
    } else {
        IdentifierKind::Username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::ValidationError(msg)) => msg,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_registration_ok() {
        assert!(validate_registration("alice", "alice@example.com", "longpassword1").is_ok());
    }

    #[test]
    fn test_validate_registration_order() {
        // 빈 필드가 가장 먼저 걸린다 (이메일도 틀렸지만 빈 필드 메시지)
        assert_eq!(
            message(validate_registration("", "bad", "x")),
            "all fields must be filled"
        );

        // 이메일 형식이 로그인 길이보다 먼저 걸린다
        assert_eq!(
            message(validate_registration("al", "not-an-email", "longpassword1")),
            "email is invalid"
        );

        // 로그인 길이가 비밀번호 길이보다 먼저 걸린다
        assert_eq!(
            message(validate_registration("al", "alice@example.com", "short")),
            "login must be at least 3 characters"
        );

        assert_eq!(
            message(validate_registration("alice", "alice@example.com", "short")),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b_c%d+e-f@sub.example.co"));
        // 대소문자 무시
        assert!(is_valid_email("Alice@Example.COM"));

        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice@example.c"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@.com"));
        assert!(!is_valid_email("alice example@example.com"));
    }

    #[test]
    fn test_validate_login() {
        // 사용자명 식별자는 이메일 형식을 요구하지 않는다
        assert!(validate_login("alice", "longpassword1").is_ok());
        assert!(validate_login("alice@example.com", "longpassword1").is_ok());

        assert_eq!(
            message(validate_login("", "longpassword1")),
            "all fields must be filled"
        );
        assert_eq!(
            message(validate_login("al", "longpassword1")),
            "login must be at least 3 characters"
        );
        assert_eq!(
            message(validate_login("alice", "short")),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_validate_password_change() {
        assert!(validate_password_change("oldpassword1", "newpassword1").is_ok());

        // 길이가 유효해도 동일한 쌍은 항상 거부
        assert!(validate_password_change("samepassword", "samepassword").is_err());
        assert!(validate_password_change("short", "newpassword1").is_err());
        assert!(validate_password_change("oldpassword1", "short").is_err());
    }

    #[test]
    fn test_classify_identifier() {
        assert_eq!(classify_identifier("alice@example.com"), IdentifierKind::Email);
        assert_eq!(classify_identifier("alice"), IdentifierKind::Username);
        assert_eq!(classify_identifier("alice@invalid"), IdentifierKind::Username);

        assert_eq!(IdentifierKind::Email.column(), "email");
        assert_eq!(IdentifierKind::Username.column(), "username");
    }
}
