use crate::error::TokenError;
use crate::utils::Clock;
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userPhone")]
    pub user_phone: String,
    pub exp: i64,
}

/// Issues and verifies HS256 identity tokens carrying the caller's phone.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_minutes: i64,
    clock: Arc<dyn Clock>,
}

impl JwtService {
    pub fn new(secret: &str, expires_in_minutes: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_minutes,
            clock,
        }
    }

    pub fn issue(&self, user_phone: &str) -> Result<String, TokenError> {
        log::info!("creating token");
        let exp = Duration::try_minutes(self.expires_in_minutes)
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::Signing(format!(
                    "token lifetime of {} minutes is out of range",
                    self.expires_in_minutes
                ))
            })?;

        let claims = Claims {
            user_phone: user_phone.to_string(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        log::info!("token successfully created");
        Ok(token)
    }

    /// Expiry is enforced by the library against `exp`, without leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        log::info!("checking token");
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                    TokenError::ExpiredOrInvalid
                }
                _ => TokenError::Malformed(e.to_string()),
            })?;

        log::info!("token is valid");
        Ok(claims)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::testing::FixedClock;
    use crate::utils::ZonedClock;
    use chrono::Utc;

    fn service(secret: &str) -> JwtService {
        let clock = ZonedClock::new("Europe/Moscow").unwrap();
        JwtService::new(secret, 60, Arc::new(clock))
    }

    #[test]
    fn test_issue_and_verify_token() {
        let jwt = service("test_secret_key");
        let token = jwt.issue("+79990000000").unwrap();
        assert!(!token.is_empty());

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.user_phone, "+79990000000");

        let expires_in = claims.exp - Utc::now().timestamp();
        assert!(expires_in > 59 * 60);
        assert!(expires_in <= 60 * 60);
    }

    #[test]
    fn test_wrong_secret_is_signature_error() {
        let token = service("secret1").issue("+79990000000").unwrap();
        let err = service("secret2").verify(&token).unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(service("s").verify("").unwrap_err(), TokenError::Empty);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let err = service("s").verify("invalid_token").unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn test_expired_token() {
        let past = FixedClock::at(Utc::now() - Duration::hours(2));
        let issuer = JwtService::new("secret", 10, Arc::new(past));
        let token = issuer.issue("+79990000000").unwrap();

        let err = service("secret").verify(&token).unwrap_err();
        assert_eq!(err, TokenError::ExpiredOrInvalid);
    }

    #[test]
    fn test_out_of_range_lifetime_is_signing_error() {
        let clock = ZonedClock::new("Europe/Moscow").unwrap();
        let jwt = JwtService::new("secret", i64::MAX / 2, Arc::new(clock));
        let err = jwt.issue("+79990000000").unwrap_err();
        assert!(matches!(err, TokenError::Signing(_)));
    }

    #[test]
    fn test_claims_use_user_phone_key() {
        let json = serde_json::to_value(Claims {
            user_phone: "+7".into(),
            exp: 1,
        })
        .unwrap();
        assert_eq!(json["userPhone"], "+7");
    }
}
