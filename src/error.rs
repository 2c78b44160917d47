use async_graphql::ErrorExtensions;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Clock error: {0}")]
    ClockError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Failure kinds of token issuing and verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is empty")]
    Empty,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("error with parsing token: {0}")]
    Malformed(String),

    #[error("token is not valid")]
    ExpiredOrInvalid,

    #[error("unable to create jwt token: {0}")]
    Signing(String),
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Empty => "TOKEN_EMPTY",
            TokenError::InvalidSignature => "TOKEN_INVALID_SIGNATURE",
            TokenError::Malformed(_) => "TOKEN_MALFORMED",
            TokenError::ExpiredOrInvalid => "TOKEN_EXPIRED",
            TokenError::Signing(_) => "TOKEN_SIGNING_FAILED",
        }
    }
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::TokenError(e) => e.error_code(),
            AppError::ClockError(_) => "CLOCK_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand back to API callers.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::TokenError(e) => e.to_string(),
            AppError::DatabaseError(_) => "Database error".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            AppError::ValidationError(msg) => log::warn!("Validation error: {msg}"),
            AppError::TokenError(e) => log::warn!("Authentication error: {e}"),
            AppError::DatabaseError(err) => log::error!("Database error: {err}"),
            _ => log::error!("Internal error: {self}"),
        }

        let code = self.error_code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}
