use crate::entities::sms_code_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsCode {
    pub id: i32,
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl From<sms_code_entity::Model> for SmsCode {
    fn from(m: sms_code_entity::Model) -> Self {
        Self {
            id: m.id,
            phone: m.phone,
            code: m.code,
            expires_at: m.expires_at,
        }
    }
}
