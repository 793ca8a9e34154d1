//! 인증된 사용자 컨텍스트
//!
//! 인증 미들웨어가 토큰 검증 후 Request Extensions에 삽입하는
//! 사용자 정보입니다. 핸들러는 추출기를 통해 이 값을 받습니다.

use std::future::{ready, Ready};
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;
use crate::errors::errors::AppError;

/// 인증된 요청의 사용자 컨텍스트
///
/// 액세스 토큰의 `sub` 클레임에서 추출된 사용자 ID만을 담습니다.
/// 최신 사용자 정보가 필요하면 핸들러가 디렉터리에서 다시 조회합니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 사용자 고유 식별자
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    /// Request Extensions에서 인증된 사용자 정보를 추출합니다.
    ///
    /// 인증 미들웨어가 적용되지 않은 라우트에서 사용하면
    /// `AuthenticationError`가 반환됩니다.
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();

        ready(user.ok_or_else(|| {
            AppError::AuthenticationError("인증 정보가 없습니다".to_string())
        }))
    }
}
