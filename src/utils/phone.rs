use crate::error::{AppError, AppResult};

pub const PHONE_REQUIRED: &str = "phone number required";

/// Only rejects an empty number; length and country code are not checked.
pub fn validate_phone(phone: &str) -> AppResult<()> {
    if phone.is_empty() {
        return Err(AppError::ValidationError(PHONE_REQUIRED.to_string()));
    }

    Ok(())
}
