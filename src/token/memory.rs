use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::Error;

use super::{StoredTokens, TokenPair, TokenStore};

/// In-process store, shared by clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore(Arc<RwLock<StoredTokens>>);

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(pair: TokenPair) -> Self {
        Self(Arc::new(RwLock::new(pair.into())))
    }

    pub fn with_access(access: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(StoredTokens {
            access: Some(access.into()),
            refresh: None,
        })))
    }

    pub fn snapshot(&self) -> StoredTokens {
        self.0.read().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.0.read().access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.0.read().refresh.clone()
    }

    fn set(&self, access: &str) -> Result<(), Error> {
        self.0.write().access = Some(access.to_string());
        Ok(())
    }

    fn set_pair(&self, pair: TokenPair) -> Result<(), Error> {
        *self.0.write() = pair.into();
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.0.write() = StoredTokens::default();
        Ok(())
    }
}
