use crate::config::SmsConfig;
use crate::database::Repository;
use crate::error::AppResult;
use crate::external::SmsSender;
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use std::sync::Arc;

/// Outcome of comparing a submitted code with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeCheck {
    Valid,
    Invalid,
    Expired,
}

/// Phone sign-in flow: request a code, exchange it for a token, resolve the viewer.
///
/// User-correctable failures come back as `ErrorPayload` values; storage,
/// clock and signing failures come back as `Err`.
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn Repository>,
    jwt_service: JwtService,
    code_generator: Arc<dyn CodeGenerator>,
    sms_sender: Arc<dyn SmsSender>,
    clock: Arc<dyn Clock>,
    sms_code_expires_in: i64,
    consume_code_on_success: bool,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn Repository>,
        jwt_service: JwtService,
        code_generator: Arc<dyn CodeGenerator>,
        sms_sender: Arc<dyn SmsSender>,
        clock: Arc<dyn Clock>,
        sms: &SmsConfig,
    ) -> Self {
        Self {
            repository,
            jwt_service,
            code_generator,
            sms_sender,
            clock,
            sms_code_expires_in: sms.expires_in,
            consume_code_on_success: sms.consume_on_success,
        }
    }

    /// Stores a fresh code for `phone`, replacing any earlier one, and sends it.
    /// Returns `None` on success.
    pub async fn request_sign_in_code(&self, phone: &str) -> AppResult<Option<ErrorPayload>> {
        if let Err(e) = validate_phone(phone) {
            log::warn!("sign-in code rejected: {e}");
            return Ok(Some(ErrorPayload::new(ErrorCode::PhoneRequired, PHONE_REQUIRED)));
        }

        let code = self.code_generator.generate();
        self.repository
            .upsert_sms_code(phone, &code, self.sms_code_expires_in)
            .await?;
        self.sms_sender.send_verification_code(phone, &code).await?;

        Ok(None)
    }

    pub async fn sign_in_by_code(&self, phone: &str, code: &str) -> AppResult<SignInOrErrorPayload> {
        match self.check_sms_code(phone, code).await? {
            CodeCheck::Valid => {}
            CodeCheck::Invalid => {
                log::warn!("invalid sms code for phone number: {phone}");
                return Ok(SignInOrErrorPayload::Error(ErrorPayload::invalid_code()));
            }
            CodeCheck::Expired => {
                log::warn!("sms code has expired for phone number: {phone}");
                return Ok(SignInOrErrorPayload::Error(ErrorPayload::code_expired()));
            }
        }

        let user = match self.repository.get_user_by_phone(phone).await? {
            Some(user) => user,
            None => {
                log::info!("registering a user");
                let user = self.repository.insert_user(NewUser::with_phone(phone)).await?;
                log::info!("user registered successfully");
                user
            }
        };

        let token = self.jwt_service.issue(&user.phone)?;

        if self.consume_code_on_success {
            self.repository.delete_sms_code(phone, code).await?;
        }

        Ok(SignInOrErrorPayload::SignIn(SignInPayload {
            token,
            viewer: Viewer::for_phone(&user.phone),
        }))
    }

    pub fn resolve_viewer(&self, token: &str) -> AppResult<Viewer> {
        let claims = self.jwt_service.verify(token)?;
        Ok(Viewer::for_phone(&claims.user_phone))
    }

    // A mismatch wins over expiry; a missing record counts as a mismatch.
    async fn check_sms_code(&self, phone: &str, code: &str) -> AppResult<CodeCheck> {
        let Some(sms_code) = self.repository.get_sms_code(phone).await? else {
            return Ok(CodeCheck::Invalid);
        };

        if sms_code.code != code {
            return Ok(CodeCheck::Invalid);
        }

        let now = self.clock.now().with_timezone(&Utc);
        if now > sms_code.expires_at {
            return Ok(CodeCheck::Expired);
        }

        Ok(CodeCheck::Valid)
    }
}
