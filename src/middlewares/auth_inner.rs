//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenKind;
use crate::errors::errors::AppError;
use crate::middlewares::auth_middleware::AuthMode;
use crate::services::auth::{extract_bearer_token, TokenService};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let token_service = TokenService::instance();

            // Authorization 헤더에서 토큰 추출 및 검증 시도
            let auth_result = authenticate_request(&req, &token_service);

            match (mode, auth_result) {
                // Required 모드에서 인증 실패
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "authentication_required",
                            "message": "유효한 인증 토큰이 필요합니다"
                        }));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                },
                // Required 모드에서 인증 성공
                (AuthMode::Required, Ok(user)) => {
                    req.extensions_mut().insert(user.clone());
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                },
                // Optional 모드에서 인증 성공
                (AuthMode::Optional, Ok(user)) => {
                    req.extensions_mut().insert(user.clone());
                    log::debug!("선택적 인증 성공: 사용자 ID {}", user.user_id);
                },
                // Optional 모드에서 인증 실패 (진행 허용)
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 토큰 없음, 요청 진행");
                },
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청의 액세스 토큰을 검증하고 인증된 사용자 컨텍스트를 생성
fn authenticate_request(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    // Authorization 헤더 추출
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    // Bearer 토큰 추출
    let token = extract_bearer_token(auth_header)?;

    // 토큰 검증 및 주체 추출
    let (user_id, kind) = token_service.parse_subject(token)?;

    // 리프레시 토큰으로는 API에 접근할 수 없다
    if kind != TokenKind::Access {
        return Err(AppError::AuthenticationError("invalid token".to_string()));
    }

    Ok(AuthenticatedUser { user_id })
}
