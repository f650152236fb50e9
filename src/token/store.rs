use crate::errors::Error;

use super::TokenPair;

/// Persistence for the current credential pair.
///
/// Readers must call [`TokenStore::get`] right before each use; a concurrent
/// refresh may replace the access token at any await point.
pub trait TokenStore: Send + Sync {
    /// Current access token, if any.
    fn get(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Replaces the access token and keeps the refresh token.
    fn set(&self, access: &str) -> Result<(), Error>;

    /// Stores a freshly issued pair (login).
    fn set_pair(&self, pair: TokenPair) -> Result<(), Error>;

    /// Forgets both tokens (logout).
    fn clear(&self) -> Result<(), Error>;
}
