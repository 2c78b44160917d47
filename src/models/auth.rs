use async_graphql::{Enum, InputObject, SimpleObject, Union};
use serde::{Deserialize, Serialize};

pub const INTERNAL_ERROR_MESSAGE: &str = "Внутренняя ошибка. Попробуйте позже";
pub const INVALID_CODE_MESSAGE: &str = "invalid sms code";
pub const CODE_EXPIRED_MESSAGE: &str = "sms code has expired";

#[derive(Debug, Serialize, Deserialize, InputObject)]
pub struct RequestSignInCodeInput {
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, InputObject)]
pub struct SignInByCodeInput {
    pub phone: String,
    pub code: String,
}

/// Kinds of user-facing failures returned as payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
pub enum ErrorCode {
    PhoneRequired,
    InvalidCode,
    CodeExpired,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_code() -> Self {
        Self::new(ErrorCode::InvalidCode, INVALID_CODE_MESSAGE)
    }

    pub fn code_expired() -> Self {
        Self::new(ErrorCode::CodeExpired, CODE_EXPIRED_MESSAGE)
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, INTERNAL_ERROR_MESSAGE)
    }
}

/// The `User` exposed through a viewer: only the phone is public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[graphql(name = "User")]
pub struct ViewerUser {
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Viewer {
    pub user: ViewerUser,
}

impl Viewer {
    pub fn for_phone(phone: &str) -> Self {
        Self {
            user: ViewerUser {
                phone: phone.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct SignInPayload {
    pub token: String,
    pub viewer: Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq, Union)]
pub enum SignInOrErrorPayload {
    SignIn(SignInPayload),
    Error(ErrorPayload),
}
