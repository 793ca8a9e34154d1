//! User HTTP Handlers
//!
//! 인증이 필요한 사용자 조회 엔드포인트입니다.

use actix_web::{get, HttpResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::users::UserService;

/// 현재 인증된 사용자 정보 조회 핸들러
///
/// 인증 미들웨어가 주입한 사용자 컨텍스트로 디렉터리에서
/// 최신 프로필을 조회합니다.
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn get_current_user(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_service = UserService::instance();

    let profile = user_service.get_user_by_id(user.user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}
