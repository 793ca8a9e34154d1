//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | HTTP | 재시도 |
//! |------|------|------|--------|
//! | 입력 검증 | `ValidationError` | 400 | 안 함 (I/O 전에 반환) |
//! | 충돌 | `ConflictError` | 409 | 안 함 |
//! | 부재/자격 증명 | `NotFound`, `AuthenticationError` | 404/401 | 안 함 |
//! | 인프라 | `DatabaseError`, `RedisError`, `InternalError` | 500 | 외부 재시도 정책의 몫 |
//! | 취소 | `Canceled` | 408 | 호출자가 포기한 경우 |
//!
//! 어떤 분류도 내부 재시도를 유발하지 않습니다. 모든 서비스 계층 에러는
//! 발생 지점의 오퍼레이션 이름으로 태깅됩니다 (`with_op`).
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn register(...) -> Result<(), AppError> {
//!     if login.is_empty() {
//!         return Err(AppError::ValidationError("all fields must be filled".to_string()));
//!     }
//!
//!     user_repo.save_user(...).await.map_err(|e| e.with_op("auth.register"))?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 인증 코어에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 취소된 컨텍스트 에러 (408 Request Timeout)
    ///
    /// 호출자가 제공한 취소 신호가 이미 발화된 경우입니다.
    /// 인프라 장애와 구분되어야 외부 호출자가 "나중에 재시도"와
    /// "클라이언트 포기"를 구별할 수 있습니다.
    #[error("Canceled: {0}")]
    Canceled(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 메시지 앞에 오퍼레이션 이름을 붙입니다.
    ///
    /// 에러 분류(변형)는 그대로 유지되므로 HTTP 상태 매핑에는
    /// 영향을 주지 않습니다.
    ///
    /// ```rust,ignore
    /// Err(AppError::NotFound("user not found".into()).with_op("auth.login"))
    /// // => Not found: auth.login: user not found
    /// ```
    pub fn with_op(self, op: &str) -> Self {
        match self {
            AppError::DatabaseError(msg) => AppError::DatabaseError(format!("{}: {}", op, msg)),
            AppError::RedisError(msg) => AppError::RedisError(format!("{}: {}", op, msg)),
            AppError::ValidationError(msg) => AppError::ValidationError(format!("{}: {}", op, msg)),
            AppError::NotFound(msg) => AppError::NotFound(format!("{}: {}", op, msg)),
            AppError::ConflictError(msg) => AppError::ConflictError(format!("{}: {}", op, msg)),
            AppError::AuthenticationError(msg) => AppError::AuthenticationError(format!("{}: {}", op, msg)),
            AppError::Canceled(msg) => AppError::Canceled(format!("{}: {}", op, msg)),
            AppError::InternalError(msg) => AppError::InternalError(format!("{}: {}", op, msg)),
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::Canceled(_) => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("all fields must be filled".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("user not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("this username already taken".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("invalid credentials".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_canceled_error_response() {
        let error = AppError::Canceled("context canceled".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_with_op_preserves_variant() {
        let error = AppError::AuthenticationError("invalid credentials".to_string())
            .with_op("auth.login");

        match error {
            AppError::AuthenticationError(msg) => {
                assert!(msg.starts_with("auth.login: "));
                assert!(msg.contains("invalid credentials"));
            }
            _ => panic!("Expected AuthenticationError"),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
