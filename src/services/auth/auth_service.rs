//! # 인증 오케스트레이터 구현
//!
//! 네 가지 사용자 대면 오퍼레이션(Register, Login, UpdateUserEmail,
//! UpdateUserPassword)과 세션 유지 오퍼레이션(Refresh, Logout)을
//! 구성하는 핵심 비즈니스 로직입니다.
//!
//! ## 검사 순서
//!
//! 모든 오퍼레이션은 엄격한 순서를 따릅니다:
//! 순수 검증 → 취소 확인 → 디렉터리 존재/유일성 확인 → 해싱 →
//! (로그인 시) 토큰 발급 → 리프레시 레코드 저장.
//! 각 단계는 완전히 성공하거나 어떤 변경도 일어나기 전에 실패하므로
//! 롤백이 필요 없습니다.
//!
//! ## 에러 정책
//!
//! - "사용자 없음"과 "비밀번호 불일치"는 외부에는 동일한
//!   `invalid credentials`로 표면화됩니다 (계정 열거 방지).
//!   내부 로그에서는 두 경우가 구분됩니다.
//! - 동시 등록 경합은 디렉터리의 유니크 제약에서 해소되며
//!   `user already exists` 충돌 에러로 변환됩니다.
//! - 모든 에러는 발생 오퍼레이션 이름으로 태깅됩니다.
//! - 어떤 에러도 내부 재시도를 유발하지 않습니다.

use std::sync::Arc;
use singleton_macro::service;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::{
    config::JwtConfig,
    domain::dto::auth::LoginResponse,
    domain::models::token::TokenKind,
    repositories::{tokens::TokenRepository, users::UserRepository},
    utils::credentials::{
        classify_identifier, validate_login, validate_password_change, validate_registration,
    },
};
use crate::errors::errors::AppError;
use crate::services::auth::{PasswordService, TokenService};

/// 인증 오케스트레이터 서비스
///
/// 자격 증명 검증기, 비밀번호 해셔, 토큰 서명기, 사용자 디렉터리,
/// 리프레시 토큰 저장소를 구성하여 인증 오퍼레이션을 수행합니다.
/// 호출 간에 상태를 가지지 않으며, 모든 가변 상태는 외부 저장소에
/// 있습니다.
#[service(name = "auth")]
pub struct AuthService {
    /// 사용자 디렉터리 (PostgreSQL)
    user_repo: Arc<UserRepository>,
    /// 리프레시 토큰 저장소 (Redis)
    token_repo: Arc<TokenRepository>,
    /// 토큰 서명/검증 서비스
    token_service: Arc<TokenService>,
    /// 비밀번호 해싱 서비스
    password_service: Arc<PasswordService>,
}

impl AuthService {
    /// 새 계정을 등록합니다.
    ///
    /// 흐름: 검증 → 취소 확인 → 사용자명 가용성 → 이메일 가용성 →
    /// 해싱 → 저장. 가용성 검사를 통과한 뒤 동시 등록이 먼저 커밋되면
    /// 디렉터리의 유니크 제약이 `user already exists` 충돌로 표면화합니다.
    pub async fn register(
        &self,
        ct: &CancellationToken,
        login: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        const OP: &str = "auth.register";

        validate_registration(login, email, password).map_err(|e| e.with_op(OP))?;

        // 비교 전 소문자 정규화 (username/email 유일성 불변식)
        let login = login.to_lowercase();
        let email = email.to_lowercase();

        self.ensure_active(ct, OP)?;

        let username_available = self
            .user_repo
            .username_available(&login)
            .await
            .map_err(|e| e.with_op(OP))?;

        if !username_available {
            return Err(AppError::ConflictError("this username already taken".to_string()).with_op(OP));
        }

        self.ensure_active(ct, OP)?;

        let email_available = self
            .user_repo
            .email_available(&email)
            .await
            .map_err(|e| e.with_op(OP))?;

        if !email_available {
            return Err(AppError::ConflictError("this email already taken".to_string()).with_op(OP));
        }

        log::info!("신규 사용자 등록 중 - username: {}", login);

        self.ensure_active(ct, OP)?;

        let password_hash = self.password_service.hash(password).map_err(|e| e.with_op(OP))?;

        self.user_repo
            .save_user(&login, &email, &password_hash)
            .await
            .map_err(|e| e.with_op(OP))?;

        log::info!("사용자 등록 완료 - username: {}", login);
        Ok(())
    }

    /// 자격 증명을 검증하고 토큰 쌍을 발급합니다.
    ///
    /// 식별자는 이메일 패턴이면 email 컬럼, 아니면 username 컬럼으로
    /// 조회됩니다. 사용자 부재와 비밀번호 불일치는 모두
    /// `invalid credentials`로 반환됩니다.
    ///
    /// 성공 시 리프레시 토큰 레코드가 저장소에 기록되고, 그 핸들이
    /// 서명된 토큰들과 함께 반환됩니다.
    pub async fn login(
        &self,
        ct: &CancellationToken,
        identifier: &str,
        password: &str,
    ) -> Result<LoginResponse, AppError> {
        const OP: &str = "auth.login";

        validate_login(identifier, password).map_err(|e| e.with_op(OP))?;

        let identifier = identifier.to_lowercase();

        self.ensure_active(ct, OP)?;

        let kind = classify_identifier(&identifier);

        let user = self
            .user_repo
            .find_by_identifier(kind, &identifier)
            .await
            .map_err(|e| e.with_op(OP))?;

        let user = match user {
            Some(user) => user,
            None => {
                // 외부에는 비밀번호 불일치와 동일하게 표면화된다
                log::warn!("로그인 실패: 사용자 없음 - identifier: {}", identifier);
                return Err(AppError::AuthenticationError("invalid credentials".to_string()).with_op(OP));
            }
        };

        self.ensure_active(ct, OP)?;

        let password_matches = self
            .password_service
            .verify(&user.password_hash, password)
            .map_err(|e| e.with_op(OP))?;

        if !password_matches {
            log::info!("로그인 실패: 비밀번호 불일치 - user_id: {}", user.id);
            return Err(AppError::AuthenticationError("invalid credentials".to_string()).with_op(OP));
        }

        let pair = self.token_service.issue_pair(user.id).map_err(|e| e.with_op(OP))?;

        self.ensure_active(ct, OP)?;

        let refresh_handle = self.token_repo.store(user.id).await.map_err(|e| e.with_op(OP))?;

        log::info!("로그인 성공 - user_id: {}", user.id);

        Ok(LoginResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            refresh_handle,
            token_type: "Bearer".to_string(),
            expires_in: JwtConfig::access_expiration_minutes() * 60,
        })
    }

    /// 사용자의 이메일을 변경합니다.
    ///
    /// 현재 이메일 일치 확인 후, 새 이메일이 다른 사용자의 소유가
    /// 아닌지 재검사하고 나서야 변경이 기록됩니다.
    pub async fn update_user_email(
        &self,
        ct: &CancellationToken,
        user_id: Uuid,
        old_email: &str,
        new_email: &str,
    ) -> Result<(), AppError> {
        const OP: &str = "auth.update_email";

        if !crate::utils::credentials::is_valid_email(old_email)
            || !crate::utils::credentials::is_valid_email(new_email)
        {
            return Err(AppError::ValidationError("email is invalid".to_string()).with_op(OP));
        }

        let old_email = old_email.to_lowercase();
        let new_email = new_email.to_lowercase();

        if old_email == new_email {
            return Err(AppError::ValidationError(
                "new email must differ from the current one".to_string(),
            )
            .with_op(OP));
        }

        self.ensure_active(ct, OP)?;

        self.user_repo
            .confirm_email(user_id, &old_email)
            .await
            .map_err(|e| e.with_op(OP))?;

        self.ensure_active(ct, OP)?;

        // 유일성 불변식 유지: 새 이메일이 이미 다른 계정에 등록되어 있으면 충돌
        let email_available = self
            .user_repo
            .email_available(&new_email)
            .await
            .map_err(|e| e.with_op(OP))?;

        if !email_available {
            return Err(AppError::ConflictError("this email already taken".to_string()).with_op(OP));
        }

        self.ensure_active(ct, OP)?;

        self.user_repo
            .update_email(user_id, &new_email)
            .await
            .map_err(|e| e.with_op(OP))?;

        log::info!("이메일 변경 완료 - user_id: {}", user_id);
        Ok(())
    }

    /// 사용자의 비밀번호를 변경합니다.
    ///
    /// 저장된 해시는 사용자 ID만으로 조회되고, 이전 비밀번호와의 비교는
    /// 비밀번호 해셔가 로컬에서 수행합니다. 비밀번호 값이 디렉터리 쿼리
    /// 조건으로 쓰이는 일은 없습니다.
    pub async fn update_user_password(
        &self,
        ct: &CancellationToken,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        const OP: &str = "auth.update_password";

        validate_password_change(old_password, new_password).map_err(|e| e.with_op(OP))?;

        self.ensure_active(ct, OP)?;

        let stored_hash = self
            .user_repo
            .password_hash_by_id(user_id)
            .await
            .map_err(|e| e.with_op(OP))?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()).with_op(OP))?;

        self.ensure_active(ct, OP)?;

        let old_matches = self
            .password_service
            .verify(&stored_hash, old_password)
            .map_err(|e| e.with_op(OP))?;

        if !old_matches {
            return Err(AppError::AuthenticationError("wrong password".to_string()).with_op(OP));
        }

        let new_hash = self.password_service.hash(new_password).map_err(|e| e.with_op(OP))?;

        self.ensure_active(ct, OP)?;

        self.user_repo
            .update_password(user_id, &new_hash)
            .await
            .map_err(|e| e.with_op(OP))?;

        log::info!("비밀번호 변경 완료 - user_id: {}", user_id);
        Ok(())
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다 (핸들 회전).
    ///
    /// 저장소 핸들과 서명된 리프레시 토큰이 모두 유효해야 하고,
    /// 토큰의 주체가 저장된 레코드의 사용자와 일치해야 합니다.
    /// 성공 시 이전 핸들은 폐기되고 새 핸들이 발급됩니다.
    pub async fn refresh(
        &self,
        ct: &CancellationToken,
        refresh_token: &str,
        refresh_handle: &str,
    ) -> Result<LoginResponse, AppError> {
        const OP: &str = "auth.refresh";

        self.ensure_active(ct, OP)?;

        let record = self.token_repo.verify(refresh_handle).await.map_err(|e| e.with_op(OP))?;

        let (subject, kind) = self
            .token_service
            .parse_subject(refresh_token)
            .map_err(|e| e.with_op(OP))?;

        // 액세스 토큰으로는 세션을 갱신할 수 없다
        if kind != TokenKind::Refresh {
            return Err(AppError::AuthenticationError("invalid token".to_string()).with_op(OP));
        }

        if subject.to_string() != record.user_id {
            log::warn!("리프레시 주체 불일치 - handle 소유자: {}, 토큰 주체: {}", record.user_id, subject);
            return Err(AppError::AuthenticationError(
                "invalid or expired refresh token".to_string(),
            )
            .with_op(OP));
        }

        self.ensure_active(ct, OP)?;

        // 회전: 이전 핸들 폐기 후 새 쌍과 새 핸들 발급
        self.token_repo.revoke(refresh_handle).await.map_err(|e| e.with_op(OP))?;

        let pair = self.token_service.issue_pair(subject).map_err(|e| e.with_op(OP))?;
        let new_handle = self.token_repo.store(subject).await.map_err(|e| e.with_op(OP))?;

        log::info!("토큰 갱신 성공 - user_id: {}", subject);

        Ok(LoginResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            refresh_handle: new_handle,
            token_type: "Bearer".to_string(),
            expires_in: JwtConfig::access_expiration_minutes() * 60,
        })
    }

    /// 세션을 종료하고 리프레시 핸들을 폐기합니다 (멱등).
    pub async fn logout(&self, refresh_handle: &str) -> Result<(), AppError> {
        const OP: &str = "auth.logout";

        self.token_repo.revoke(refresh_handle).await.map_err(|e| e.with_op(OP))
    }

    /// 취소 신호를 확인합니다.
    ///
    /// 이미 취소된 컨텍스트에서는 추가 I/O 전에 중단하고 인프라 에러와
    /// 구분되는 취소 에러를 반환합니다.
    fn ensure_active(&self, ct: &CancellationToken, op: &str) -> Result<(), AppError> {
        if ct.is_cancelled() {
            return Err(AppError::Canceled(format!("{}: context canceled", op)));
        }
        Ok(())
    }
}
