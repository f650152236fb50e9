//! Unverified peek at access-token claims, for display only.

use jiff::Timestamp;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::errors::Error;

#[derive(Clone, Debug, Deserialize)]
pub struct AccessClaims {
    pub exp: Option<i64>,
    pub iat: Option<i64>,
    pub token_type: Option<String>,
    pub user_id: Option<serde_json::Value>,
}

impl AccessClaims {
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.exp.and_then(|s| Timestamp::from_second(s).ok())
    }

    pub fn issued_at(&self) -> Option<Timestamp> {
        self.iat.and_then(|s| Timestamp::from_second(s).ok())
    }

    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// Decodes the payload without checking the signature or expiry.
/// Never use the result to decide whether a request is authorized.
pub fn peek(token: &str) -> Result<AccessClaims, Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| Error::Token(e.to_string()))?;
    Ok(data.claims)
}
