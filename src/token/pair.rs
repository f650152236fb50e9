use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Access/refresh pair issued by the token endpoint at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    /// Rejects empty tokens; the backend never issues them.
    pub fn try_new(access: impl Into<String>, refresh: impl Into<String>) -> Result<Self, Error> {
        let access = access.into();
        let refresh = refresh.into();
        if access.is_empty() || refresh.is_empty() {
            return Err(Error::Token("token pair contains an empty token".into()));
        }
        Ok(Self { access, refresh })
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &format_args!("<{} bytes>", self.access.len()))
            .field("refresh", &format_args!("<{} bytes>", self.refresh.len()))
            .finish()
    }
}

/// What a store holds between calls. Either slot may be empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl StoredTokens {
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

impl From<TokenPair> for StoredTokens {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: Some(pair.access),
            refresh: Some(pair.refresh),
        }
    }
}

impl fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredTokens")
            .field("access", &self.access.as_ref().map(|t| t.len()))
            .field("refresh", &self.refresh.as_ref().map(|t| t.len()))
            .finish()
    }
}
