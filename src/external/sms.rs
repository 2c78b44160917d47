use crate::error::AppResult;
use async_trait::async_trait;

/// Delivery of sign-in codes to a phone.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_verification_code(&self, phone: &str, code: &str) -> AppResult<()>;
}

/// Stand-in for an SMS gateway: the message only goes to the server log.
#[derive(Clone, Default)]
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send_verification_code(&self, phone: &str, code: &str) -> AppResult<()> {
        log::info!("sms sent to phone number: {phone} | code: {code}");
        Ok(())
    }
}
