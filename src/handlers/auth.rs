//! Authentication HTTP Handlers
//!
//! 인증 오퍼레이션의 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 핸들러는 역직렬화와 1차 검증만 수행하고, 모든 비즈니스 로직은
//! 오케스트레이터(`AuthService`)에 위임합니다.
//!
//! 각 핸들러는 main에서 등록된 루트 취소 토큰을 오케스트레이터에
//! 전달합니다. 셧다운 중에는 진행 중인 오퍼레이션이 다음 I/O 전에
//! 취소 에러로 중단됩니다.

use actix_web::{patch, post, web, HttpResponse};
use tokio_util::sync::CancellationToken;
use validator::Validate;
use crate::domain::dto::auth::{
    LoginRequest, LogoutRequest, MessageResponse, RefreshRequest, RegisterRequest,
    UpdateEmailRequest, UpdatePasswordRequest,
};
use crate::errors::errors::AppError;
use crate::services::auth::AuthService;

/// 계정 등록 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/register`
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    ct: web::Data<CancellationToken>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    auth_service
        .register(&ct, &payload.username, &payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("user created")))
}

/// 로그인 핸들러
///
/// 식별자(사용자명 또는 이메일)와 비밀번호를 검증하고 토큰 쌍과
/// 리프레시 핸들을 반환합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/sign-in`
#[post("/sign-in")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    ct: web::Data<CancellationToken>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    let outcome = auth_service
        .login(&ct, &payload.identifier, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// 이메일 변경 핸들러
///
/// # Endpoint
/// `PATCH /api/v1/auth/email`
#[patch("/email")]
pub async fn update_user_email(
    payload: web::Json<UpdateEmailRequest>,
    ct: web::Data<CancellationToken>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    auth_service
        .update_user_email(&ct, payload.user_id, &payload.old_email, &payload.new_email)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("email updated successfully")))
}

/// 비밀번호 변경 핸들러
///
/// # Endpoint
/// `PATCH /api/v1/auth/password`
#[patch("/password")]
pub async fn update_user_password(
    payload: web::Json<UpdatePasswordRequest>,
    ct: web::Data<CancellationToken>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    auth_service
        .update_user_password(&ct, payload.user_id, &payload.old_password, &payload.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("password updated successfully")))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰과 저장소 핸들을 검증하고 새 토큰 쌍을 발급합니다.
/// 이전 핸들은 폐기됩니다 (회전).
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    payload: web::Json<RefreshRequest>,
    ct: web::Data<CancellationToken>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    let outcome = auth_service
        .refresh(&ct, &payload.refresh_token, &payload.refresh_handle)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// 로그아웃 핸들러
///
/// 리프레시 핸들을 폐기합니다. 이미 폐기된(또는 만료된) 핸들을
/// 다시 폐기해도 성공으로 처리됩니다.
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout")]
pub async fn logout(
    payload: web::Json<LogoutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let auth_service = AuthService::instance();

    auth_service.logout(&payload.refresh_handle).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("logged out")))
}
